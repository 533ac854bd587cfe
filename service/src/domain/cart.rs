//! [`CartItem`] definitions.

use common::{unit, DateTimeOf};
#[cfg(doc)]
use common::DateTime;
use serde::{Deserialize, Serialize};

use super::diamond::{CertificateNumber, PublicDiamond};

define_id! {
    #[doc = "ID of a [`CartItem`]."]
    Id
}

/// Diamond put into the cart of a customer.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// ID of this [`CartItem`].
    #[serde(rename = "_id")]
    pub id: Id,

    /// [`PublicDiamond`] put into the cart.
    pub diamond: PublicDiamond,

    /// [`DateTime`] when this [`CartItem`] was added.
    pub added_at: AdditionDateTime,
}

/// New [`CartItem`] to be added.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct New {
    /// [`CertificateNumber`] of the diamond to add.
    pub certificate_number: CertificateNumber,
}

/// [`DateTime`] when a [`CartItem`] was added.
pub type AdditionDateTime = DateTimeOf<(CartItem, unit::Addition)>;

#[cfg(test)]
mod spec {
    use super::CartItem;

    #[test]
    fn deserializes_cart_item() {
        let item: CartItem = serde_json::from_value(serde_json::json!({
            "_id": "c1",
            "diamond": {
                "certificateNumber": "2141438172",
                "shape": "HEART",
                "weight": 0.9,
                "lab": "HRD",
                "totalPrice": 3100,
            },
            "addedAt": "2026-10-16T09:30:00Z",
        }))
        .unwrap();

        assert_eq!(item.id.as_ref(), "c1");
        assert_eq!(item.diamond.certificate_number.as_ref(), "2141438172");
        assert_eq!(item.added_at.to_date_string(), "16 Oct 2026");
    }
}
