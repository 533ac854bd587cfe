//! Rendering of the inventory [`Listing`]s.

use askama::Template;
use rust_decimal::Decimal;
use service::domain::{Diamond, Listing, PublicDiamond};

use super::{
    comparison::Criterion,
    table::{Column, Row},
    Cell,
};

impl Row for Listing {
    fn id(&self) -> Option<String> {
        Listing::id(self).map(ToString::to_string)
    }

    fn natural_key(&self) -> Option<String> {
        Some(self.certificate_number().to_string())
    }

    fn field(&self, key: &str) -> Option<String> {
        let d = self.public();
        Some(match key {
            "certificateNumber" => d.certificate_number.to_string(),
            "shape" => d.shape.to_string(),
            "weight" => d.weight.normalize().to_string(),
            "color" => d.color?.to_string(),
            "clarity" => d.clarity?.to_string(),
            "cut" => d.cut?.to_string(),
            "polish" => d.polish?.to_string(),
            "symmetry" => d.symmetry?.to_string(),
            "fluorescence" => d.fluorescence?.to_string(),
            "lab" => d.lab.to_string(),
            "measurements" => d.measurements()?,
            "ratio" => d.ratio()?.normalize().to_string(),
            "depthPercent" => d.depth_percent?.to_string(),
            "tablePercent" => d.table_percent?.to_string(),
            "pricePerCarat" => d.price_per_carat()?.to_string(),
            "totalPrice" => d.total_price().to_string(),
            _ => return self.internal_field(key),
        })
    }
}

/// Extension of a [`Listing`] with its staff-only fields.
trait InternalField {
    /// Returns the staff-only field with the provided `key`, if this is a
    /// [`Listing::Internal`] one.
    fn internal_field(&self, key: &str) -> Option<String>;
}

impl InternalField for Listing {
    fn internal_field(&self, key: &str) -> Option<String> {
        let Listing::Internal(d) = self else {
            return None;
        };
        Some(match key {
            "id" => d.id.to_string(),
            "rapPrice" => money(d.rap_price?),
            "discount" => signed_percent(d.discount()?),
            "supplier" => d.supplier.clone()?,
            "location" => d.location.clone()?,
            "status" => d.status?.to_string(),
            _ => return None,
        })
    }
}

/// Builds a [`Column`] rendering each [`Listing`] variant with its own
/// renderer.
fn column<'a>(
    key: &'static str,
    header: &'static str,
    internal: impl Fn(&Diamond) -> Cell + Send + Sync + 'a,
    public: impl Fn(&PublicDiamond) -> Cell + Send + Sync + 'a,
) -> Column<'a, Listing> {
    Column::new(key, header).render(move |l| match l {
        Listing::Internal(d) => internal(d),
        Listing::Public(d) => public(d),
    })
}

/// Returns the [`Column`]s of a [`Listing`] table.
///
/// Staff sees the trading details along with the grading ones.
#[must_use]
pub fn columns<'a>(staff: bool) -> Vec<Column<'a, Listing>> {
    let mut columns = vec![
        column(
            "certificateNumber",
            "Certificate",
            |d| {
                Cell::link(
                    format!("/admin/diamonds/{}", d.id),
                    d.public.certificate_number.to_string(),
                )
            },
            |d| {
                Cell::link(
                    format!("/diamonds/{}", d.certificate_number),
                    d.certificate_number.to_string(),
                )
            },
        ),
        Column::new("shape", "Shape"),
        Column::new("weight", "Carat"),
        Column::new("color", "Color"),
        Column::new("clarity", "Clarity"),
        Column::new("cut", "Cut"),
    ];
    if staff {
        columns.extend([
            Column::new("polish", "Polish"),
            Column::new("symmetry", "Symmetry"),
            Column::new("fluorescence", "Fluorescence"),
        ]);
    }
    columns.push(Column::new("lab", "Lab"));
    if staff {
        columns.extend([
            Column::new("measurements", "Measurements"),
            Column::new("rapPrice", "Rap"),
            Column::new("discount", "Discount").cell_class(|l: &Listing| {
                let Listing::Internal(d) = l else {
                    return None;
                };
                d.discount()
                    .filter(Decimal::is_sign_negative)
                    .map(|_| "below-list".to_owned())
            }),
            Column::new("supplier", "Supplier"),
            Column::new("location", "Location"),
            Column::new("status", "Status"),
        ]);
    }
    columns.push(column(
        "totalPrice",
        "Price",
        |d| {
            let price = price(&d.public);
            match d.public.price_per_carat() {
                Some(per_carat) => Cell::Group(vec![
                    price,
                    Cell::Styled {
                        class: "per-carat",
                        text: format!(" {per_carat}/ct"),
                    },
                ]),
                None => price,
            }
        },
        price,
    ));
    columns
}

/// Renders the total price of the provided [`PublicDiamond`].
fn price(d: &PublicDiamond) -> Cell {
    Cell::Styled {
        class: "price",
        text: d.total_price().to_string(),
    }
}

/// Returns the comparison [`Criterion`]s of [`Listing`]s.
#[must_use]
pub fn criteria<'a>() -> Vec<Criterion<'a, Listing>> {
    let field = |key: &'static str| move |l: &Listing| l.field(key);
    vec![
        Criterion::new("Certificate", field("certificateNumber")),
        Criterion::new("Shape", field("shape")),
        Criterion::new("Carat", field("weight")),
        Criterion::new("Color", field("color")),
        Criterion::new("Clarity", field("clarity")),
        Criterion::new("Cut", field("cut")),
        Criterion::new("Polish", field("polish")),
        Criterion::new("Symmetry", field("symmetry")),
        Criterion::new("Fluorescence", field("fluorescence")),
        Criterion::new("Lab", field("lab")),
        Criterion::new("Measurements", field("measurements")),
        Criterion::new("L/W ratio", field("ratio")),
        Criterion::new("Depth %", field("depthPercent")),
        Criterion::new("Table %", field("tablePercent")),
        Criterion::new("Price per carat", field("pricePerCarat")),
        Criterion::new("Discount %", field("discount")),
        Criterion::new("Total price", field("totalPrice")),
    ]
}

/// Detailed view of a single [`Listing`].
#[derive(Debug, Template)]
#[template(path = "components/details.html")]
pub struct Details {
    /// Title of the diamond.
    title: String,

    /// URL of the stone photo, if any.
    image_url: Option<String>,

    /// URL of the 360° video, if any.
    video_url: Option<String>,

    /// URL of the grading certificate, if any.
    certificate_url: Option<String>,

    /// Labeled facts about the diamond.
    facts: Vec<(&'static str, String)>,
}

impl Details {
    /// Creates the [`Details`] of the provided [`Listing`].
    #[must_use]
    pub fn new(listing: &Listing) -> Self {
        let d = listing.public();
        Self {
            title: d.title(),
            image_url: d.image_url.clone(),
            video_url: d.video_url.clone(),
            certificate_url: d.certificate_url.clone(),
            facts: criteria()
                .into_iter()
                .map(|c| (c.label, c.value(listing)))
                .collect(),
        }
    }
}

/// Formats the provided US dollars amount.
fn money(amount: Decimal) -> String {
    common::Money::usd(amount).to_string()
}

/// Formats the provided percentage keeping its sign.
fn signed_percent(value: Decimal) -> String {
    format!("{}%", value.normalize())
}

#[cfg(test)]
mod spec {
    use service::domain::{Diamond, Listing, PublicDiamond};

    use crate::view::{
        comparison::{Comparison, MISSING},
        table::{row_key, Row as _, Table},
        Cell,
    };

    use super::{columns, criteria, Details};

    fn public() -> PublicDiamond {
        serde_json::from_value(serde_json::json!({
            "certificateNumber": "2141438172",
            "shape": "OVAL",
            "weight": 1.5,
            "color": "F",
            "clarity": "VS2",
            "lab": "GIA",
            "length": 9.1,
            "width": 6.5,
            "depth": 4.0,
            "totalPrice": 12000,
        }))
        .unwrap()
    }

    fn internal() -> Diamond {
        serde_json::from_value(serde_json::json!({
            "_id": "64f1c2aa9d3e4b0012ab34cd",
            "certificateNumber": "7000000001",
            "shape": "ROUND",
            "weight": 1,
            "lab": "IGI",
            "totalPrice": 9000,
            "rapPrice": 10000,
            "supplier": "Antwerp Direct",
        }))
        .unwrap()
    }

    #[test]
    fn keys_by_id_then_certificate() {
        assert_eq!(
            row_key(&Listing::Internal(internal())),
            "64f1c2aa9d3e4b0012ab34cd",
        );
        assert_eq!(row_key(&Listing::Public(public())), "2141438172");
    }

    #[test]
    fn cells_dispatch_on_variant() {
        let rows =
            vec![Listing::Internal(internal()), Listing::Public(public())];

        let html = Table::new(columns(true), &rows).to_string();

        assert!(
            html.contains(
                "<a href=\"/admin/diamonds/64f1c2aa9d3e4b0012ab34cd\">\
                 7000000001</a>",
            ),
            "{html}",
        );
        assert!(
            html.contains(r#"<a href="/diamonds/2141438172">2141438172</a>"#),
            "{html}",
        );
        assert!(
            html.contains(r#"<span class="per-carat"> $9,000/ct</span>"#),
            "{html}",
        );
        assert!(
            html.contains(r#"<td class="below-list">-10%</td>"#),
            "{html}",
        );
    }

    #[test]
    fn customers_see_no_trading_details() {
        let rows = vec![Listing::Public(public())];

        let html = Table::new(columns(false), &rows).to_string();

        assert!(!html.contains("Supplier"), "{html}");
        assert!(!html.contains("Rap"), "{html}");
        assert_eq!(Listing::Public(public()).field("supplier"), None);
    }

    #[test]
    fn comparison_derives_ratio_and_discount() {
        let items =
            vec![Listing::Public(public()), Listing::Internal(internal())];

        let rows =
            Comparison::new(criteria(), &items, |_| Cell::empty()).rows();
        let row = |label| {
            rows.iter().find(|(l, _)| *l == label).unwrap().1.clone()
        };

        assert_eq!(row("L/W ratio"), ["1.4".to_owned(), MISSING.to_owned()]);
        assert_eq!(
            row("Discount %"),
            [MISSING.to_owned(), "-10%".to_owned()],
        );
        assert_eq!(row("Color"), ["F".to_owned(), MISSING.to_owned()]);
    }

    #[test]
    fn details_list_facts_and_media() {
        let mut d = public();
        d.certificate_url = Some("https://gia.edu/report?n=1&x=2".into());

        let html = Details::new(&Listing::Public(d)).to_string();

        assert!(html.contains("<h2>1.5ct OVAL F VS2</h2>"), "{html}");
        assert!(
            html.contains(r#"<a href="https://gia.edu/report?n=1&#38;x=2">"#),
            "{html}",
        );
        assert!(html.contains("<dt>L/W ratio</dt>"), "{html}");
        assert!(!html.contains("<img"), "{html}");
    }
}
