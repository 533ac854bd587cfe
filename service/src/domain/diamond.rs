//! [`Diamond`] definitions.

use std::{fmt, str::FromStr};

use common::{define_kind, Money, Percent};
use derive_more::{AsRef, Display};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

define_id! {
    #[doc = "ID of a [`Diamond`] in the inventory."]
    Id
}

/// Graded stone as exposed to the storefront customers.
///
/// Identified publicly by its [`CertificateNumber`] only.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicDiamond {
    /// [`CertificateNumber`] issued by the grading [`Lab`].
    pub certificate_number: CertificateNumber,

    /// [`Shape`] of the stone.
    pub shape: Shape,

    /// Weight in carats.
    pub weight: Decimal,

    /// [`Color`] grade, absent for fancy colored stones.
    pub color: Option<Color>,

    /// [`Clarity`] grade.
    pub clarity: Option<Clarity>,

    /// Cut [`Grade`].
    #[serde(rename = "cutGrade")]
    pub cut: Option<Grade>,

    /// Polish [`Grade`].
    pub polish: Option<Grade>,

    /// Symmetry [`Grade`].
    pub symmetry: Option<Grade>,

    /// [`Fluorescence`] intensity.
    #[serde(rename = "fluorescenceIntensity")]
    pub fluorescence: Option<Fluorescence>,

    /// Grading [`Lab`].
    pub lab: Lab,

    /// Length in millimeters.
    pub length: Option<Decimal>,

    /// Width in millimeters.
    pub width: Option<Decimal>,

    /// Depth in millimeters.
    pub depth: Option<Decimal>,

    /// Total depth relative to the width.
    #[serde(rename = "depthPerc")]
    pub depth_percent: Option<Percent>,

    /// Table size relative to the width.
    #[serde(rename = "tablePerc")]
    pub table_percent: Option<Percent>,

    /// Asking price per carat, in US dollars.
    pub price_per_carat: Option<Decimal>,

    /// Total asking price, in US dollars.
    pub total_price: Decimal,

    /// URL of the stone photo.
    pub image_url: Option<String>,

    /// URL of the 360° video.
    pub video_url: Option<String>,

    /// URL of the grading certificate.
    pub certificate_url: Option<String>,
}

impl PublicDiamond {
    /// Returns the total asking price.
    #[must_use]
    pub fn total_price(&self) -> Money {
        Money::usd(self.total_price)
    }

    /// Returns the asking price per carat, deriving it from the total price
    /// when the inventory omits it.
    #[must_use]
    pub fn price_per_carat(&self) -> Option<Money> {
        self.price_per_carat
            .or_else(|| {
                let per_carat = self.total_price.checked_div(self.weight)?;
                Some(per_carat.round_dp(2))
            })
            .map(Money::usd)
    }

    /// Returns the length-to-width ratio, rounded to two decimal places.
    #[must_use]
    pub fn ratio(&self) -> Option<Decimal> {
        let (length, width) = (self.length?, self.width?);
        Some(length.checked_div(width)?.round_dp(2))
    }

    /// Returns the `length x width x depth` measurements in millimeters.
    #[must_use]
    pub fn measurements(&self) -> Option<String> {
        Some(format!(
            "{} x {} x {}",
            self.length?.normalize(),
            self.width?.normalize(),
            self.depth?.normalize(),
        ))
    }

    /// Returns a short human readable title, e.g. `1.01ct ROUND D VS1`.
    #[must_use]
    pub fn title(&self) -> String {
        let mut title = format!("{}ct {}", self.weight.normalize(), self.shape);
        if let Some(color) = self.color {
            title = format!("{title} {color}");
        }
        if let Some(clarity) = self.clarity {
            title = format!("{title} {clarity}");
        }
        title
    }
}

/// Inventory stone with the internal trading details.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diamond {
    /// ID of this [`Diamond`].
    #[serde(rename = "_id")]
    pub id: Id,

    /// Customer-facing part of this [`Diamond`].
    #[serde(flatten)]
    pub public: PublicDiamond,

    /// List (Rapaport) price per carat, in US dollars.
    pub rap_price: Option<Decimal>,

    /// Discount against the list price, in percents (negative when below the
    /// list price).
    pub discount: Option<Decimal>,

    /// Supplier the stone is sourced from.
    pub supplier: Option<String>,

    /// Location the stone is held at.
    pub location: Option<String>,

    /// [`Availability`] of this [`Diamond`].
    pub status: Option<Availability>,
}

impl Diamond {
    /// Returns the discount against the list price in percents.
    ///
    /// The reported discount is preferred; otherwise it's derived from the
    /// price per carat and the list price.
    #[must_use]
    pub fn discount(&self) -> Option<Decimal> {
        self.discount.or_else(|| {
            let rap = self.rap_price?;
            let per_carat = self.public.price_per_carat()?.amount;
            let ratio = per_carat.checked_div(rap)?.checked_sub(Decimal::ONE)?;
            Some(ratio.checked_mul(Decimal::ONE_HUNDRED)?.round_dp(2))
        })
    }
}

/// Inventory entry as rendered in listings.
///
/// The variant is chosen by the requesting [`Audience`] and never inferred
/// from the shape of the received data.
#[derive(Clone, Debug)]
pub enum Listing {
    /// [`Diamond`] with internal details, listed to the staff.
    Internal(Diamond),

    /// [`PublicDiamond`] listed to the customers.
    Public(PublicDiamond),
}

impl Listing {
    /// Returns the customer-facing part of this [`Listing`].
    #[must_use]
    pub fn public(&self) -> &PublicDiamond {
        match self {
            Self::Internal(d) => &d.public,
            Self::Public(d) => d,
        }
    }

    /// Returns the inventory [`Id`], if it's known to the [`Audience`].
    #[must_use]
    pub fn id(&self) -> Option<&Id> {
        match self {
            Self::Internal(d) => Some(&d.id),
            Self::Public(_) => None,
        }
    }

    /// Returns the [`CertificateNumber`] of this [`Listing`].
    #[must_use]
    pub fn certificate_number(&self) -> &CertificateNumber {
        &self.public().certificate_number
    }

    /// Returns the [`Audience`] this [`Listing`] is shaped for.
    #[must_use]
    pub fn audience(&self) -> Audience {
        match self {
            Self::Internal(_) => Audience::Staff,
            Self::Public(_) => Audience::Customer,
        }
    }
}

/// Audience a [`Listing`] is requested for.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Audience {
    /// Storefront customers.
    #[default]
    Customer,

    /// Back-office staff.
    Staff,
}

/// Certificate number of a [`Diamond`], used as its public lookup key.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str)]
#[serde(transparent)]
pub struct CertificateNumber(String);

impl CertificateNumber {
    /// Creates a new [`CertificateNumber`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`CertificateNumber`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        !number.is_empty()
            && number.len() <= 64
            && number.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    }
}

impl FromStr for CertificateNumber {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `CertificateNumber`")
    }
}

/// Key a single [`Diamond`] is looked up by.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Key {
    /// Inventory [`Id`].
    Id(Id),

    /// Public [`CertificateNumber`].
    Certificate(CertificateNumber),
}

impl Key {
    /// Length of the hexadecimal object IDs the inventory assigns.
    const OBJECT_ID_LEN: usize = 24;
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Certificate(num) => write!(f, "{num}"),
        }
    }
}

/// Treats 24 hexadecimal characters as an inventory [`Id`] and anything else
/// as a [`CertificateNumber`].
impl FromStr for Key {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == Self::OBJECT_ID_LEN
            && s.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Ok(Self::Id(Id::from(s)));
        }
        CertificateNumber::from_str(s).map(Self::Certificate)
    }
}

/// Lookup of a single [`Listing`].
#[derive(Clone, Debug)]
pub struct Lookup {
    /// [`Key`] to look the [`Listing`] up by.
    pub key: Key,

    /// [`Audience`] to shape the [`Listing`] for.
    pub audience: Audience,
}

define_kind! {
    #[doc = "Shape of a [`Diamond`]."]
    enum Shape {
        #[doc = "Round brilliant."]
        Round = "ROUND",

        #[doc = "Princess."]
        Princess = "PRINCESS",

        #[doc = "Cushion."]
        Cushion = "CUSHION",

        #[doc = "Oval."]
        Oval = "OVAL",

        #[doc = "Emerald."]
        Emerald = "EMERALD",

        #[doc = "Pear."]
        Pear = "PEAR",

        #[doc = "Marquise."]
        Marquise = "MARQUISE",

        #[doc = "Asscher."]
        Asscher = "ASSCHER",

        #[doc = "Radiant."]
        Radiant = "RADIANT",

        #[doc = "Heart."]
        Heart = "HEART",
    }
}

define_kind! {
    #[doc = "Color grade of a [`Diamond`], from colorless `D` to light `M`."]
    enum Color {
        #[doc = "Colorless `D`."]
        D = "D",

        #[doc = "Colorless `E`."]
        E = "E",

        #[doc = "Colorless `F`."]
        F = "F",

        #[doc = "Near colorless `G`."]
        G = "G",

        #[doc = "Near colorless `H`."]
        H = "H",

        #[doc = "Near colorless `I`."]
        I = "I",

        #[doc = "Near colorless `J`."]
        J = "J",

        #[doc = "Faint `K`."]
        K = "K",

        #[doc = "Faint `L`."]
        L = "L",

        #[doc = "Faint `M`."]
        M = "M",
    }
}

define_kind! {
    #[doc = "Clarity grade of a [`Diamond`]."]
    enum Clarity {
        #[doc = "Flawless."]
        Fl = "FL",

        #[doc = "Internally flawless."]
        If = "IF",

        #[doc = "Very, very slightly included (1)."]
        Vvs1 = "VVS1",

        #[doc = "Very, very slightly included (2)."]
        Vvs2 = "VVS2",

        #[doc = "Very slightly included (1)."]
        Vs1 = "VS1",

        #[doc = "Very slightly included (2)."]
        Vs2 = "VS2",

        #[doc = "Slightly included (1)."]
        Si1 = "SI1",

        #[doc = "Slightly included (2)."]
        Si2 = "SI2",

        #[doc = "Included (1)."]
        I1 = "I1",

        #[doc = "Included (2)."]
        I2 = "I2",

        #[doc = "Included (3)."]
        I3 = "I3",
    }
}

define_kind! {
    #[doc = "Grade of a [`Diamond`] cut, polish or symmetry."]
    enum Grade {
        #[doc = "Excellent."]
        Excellent = "EX",

        #[doc = "Very good."]
        VeryGood = "VG",

        #[doc = "Good."]
        Good = "G",

        #[doc = "Fair."]
        Fair = "F",

        #[doc = "Poor."]
        Poor = "P",
    }
}

define_kind! {
    #[doc = "Fluorescence intensity of a [`Diamond`]."]
    enum Fluorescence {
        #[doc = "No fluorescence."]
        Inert = "NON",

        #[doc = "Faint."]
        Faint = "FNT",

        #[doc = "Medium."]
        Medium = "MED",

        #[doc = "Strong."]
        Strong = "STG",

        #[doc = "Very strong."]
        VeryStrong = "VST",
    }
}

define_kind! {
    #[doc = "Laboratory that graded a [`Diamond`]."]
    enum Lab {
        #[doc = "Gemological Institute of America."]
        Gia = "GIA",

        #[doc = "International Gemological Institute."]
        Igi = "IGI",

        #[doc = "Hoge Raad voor Diamant."]
        Hrd = "HRD",

        #[doc = "Gem Certification & Assurance Lab."]
        Gcal = "GCAL",
    }
}

define_kind! {
    #[doc = "Availability of a [`Diamond`] for trading."]
    enum Availability {
        #[doc = "Available for sale."]
        Available = "AVAILABLE",

        #[doc = "Reserved for a customer."]
        OnHold = "ON_HOLD",

        #[doc = "Sold."]
        Sold = "SOLD",
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use rust_decimal::Decimal;

    use super::{
        Audience, CertificateNumber, Color, Diamond, Grade, Key, Listing,
        PublicDiamond, Shape,
    };

    pub(crate) fn public_diamond(certificate: &str) -> PublicDiamond {
        serde_json::from_value(serde_json::json!({
            "certificateNumber": certificate,
            "shape": "ROUND",
            "weight": 1.01,
            "color": "D",
            "clarity": "VS1",
            "cutGrade": "EX",
            "polish": "EX",
            "symmetry": "VG",
            "fluorescenceIntensity": "NON",
            "lab": "GIA",
            "length": 6.45,
            "width": 6.40,
            "depth": 3.98,
            "depthPerc": 62.1,
            "tablePerc": 57,
            "totalPrice": 8080,
        }))
        .unwrap()
    }

    #[test]
    fn deserializes_public_diamond() {
        let d = public_diamond("2141438172");
        assert_eq!(d.shape, Shape::Round);
        assert_eq!(d.color, Some(Color::D));
        assert_eq!(d.symmetry, Some(Grade::VeryGood));
        assert_eq!(d.title(), "1.01ct ROUND D VS1");
        assert_eq!(d.measurements().as_deref(), Some("6.45 x 6.4 x 3.98"));
        assert!(d.image_url.is_none());
    }

    #[test]
    fn derives_price_per_carat_and_ratio() {
        let d = public_diamond("2141438172");
        assert_eq!(d.price_per_carat().unwrap().amount, Decimal::new(8000, 0));
        assert_eq!(d.ratio(), Some(Decimal::new(101, 2)));

        let mut flat = d;
        flat.width = Some(Decimal::ZERO);
        assert_eq!(flat.ratio(), None);
    }

    #[test]
    fn extreme_figures_are_missing_instead_of_overflowing() {
        let d: PublicDiamond = serde_json::from_value(serde_json::json!({
            "certificateNumber": "2141438172",
            "shape": "ROUND",
            "weight": "0.0000000001",
            "lab": "GIA",
            "length": "79228162514264337593543950",
            "width": "0.0000000001",
            "totalPrice": "79228162514264337593543950",
        }))
        .unwrap();
        assert_eq!(d.price_per_carat(), None);
        assert_eq!(d.ratio(), None);

        let zero_weight = PublicDiamond {
            weight: Decimal::ZERO,
            ..d
        };
        assert_eq!(zero_weight.price_per_carat(), None);

        let d: Diamond = serde_json::from_value(serde_json::json!({
            "_id": "x",
            "certificateNumber": "LG1",
            "shape": "PEAR",
            "weight": 1,
            "lab": "GIA",
            "pricePerCarat": "79228162514264337593543950",
            "totalPrice": "79228162514264337593543950",
            "rapPrice": "0.0000000001",
        }))
        .unwrap();
        assert_eq!(d.discount(), None);
    }

    #[test]
    fn deserializes_internal_diamond() {
        let d: Diamond = serde_json::from_value(serde_json::json!({
            "_id": "65f1c2a9e4b0a1b2c3d4e5f6",
            "certificateNumber": "LG123",
            "shape": "OVAL",
            "weight": 2,
            "lab": "IGI",
            "pricePerCarat": 3500,
            "totalPrice": 7000,
            "rapPrice": 5000,
            "status": "ON_HOLD",
        }))
        .unwrap();

        assert_eq!(d.id.as_ref(), "65f1c2a9e4b0a1b2c3d4e5f6");
        assert_eq!(d.discount(), Some(Decimal::new(-30, 0)));

        let listing = Listing::Internal(d);
        assert_eq!(listing.audience(), Audience::Staff);
        assert_eq!(listing.certificate_number().as_ref(), "LG123");
        assert!(listing.id().is_some());
    }

    #[test]
    fn reported_discount_wins() {
        let mut d: Diamond = serde_json::from_value(serde_json::json!({
            "_id": "x",
            "certificateNumber": "LG1",
            "shape": "PEAR",
            "weight": 1,
            "lab": "GIA",
            "totalPrice": 1000,
            "rapPrice": 2000,
            "discount": -42.5,
        }))
        .unwrap();
        assert_eq!(d.discount(), Some(Decimal::new(-425, 1)));

        d.discount = None;
        assert_eq!(d.discount(), Some(Decimal::new(-50, 0)));
    }

    #[test]
    fn parses_lookup_keys() {
        assert_eq!(
            "65f1c2a9e4b0a1b2c3d4e5f6".parse::<Key>(),
            Ok(Key::Id("65f1c2a9e4b0a1b2c3d4e5f6".into())),
        );
        assert_eq!(
            "2141438172".parse::<Key>(),
            Ok(Key::Certificate(CertificateNumber::new("2141438172").unwrap())),
        );
        assert!("../etc".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }
}
