//! [`Filter`] state of the inventory browsing and its reducers.
//!
//! [`Filter`] is a plain value: every reducer either mutates it in place or
//! consumes and returns it, so state transitions are testable in isolation.

use common::{define_kind, Kind, Range};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::diamond::{Clarity, Color, Fluorescence, Grade, Lab, Shape};

/// Default carat [`Range`]: `[0, 10.99]`.
pub const DEFAULT_CARAT: Range<Decimal> =
    Range::new(Decimal::ZERO, Decimal::from_parts(1099, 0, 0, false, 2));

/// Default price [`Range`] in US dollars: `[0, 1000000]`.
pub const DEFAULT_PRICE: Range<Decimal> =
    Range::new(Decimal::ZERO, Decimal::from_parts(1_000_000, 0, 0, false, 0));

/// Default [`Range`] of every dimension in millimeters: `[0, 20]`.
pub const DEFAULT_DIMENSION: Range<Decimal> =
    Range::new(Decimal::ZERO, Decimal::from_parts(20, 0, 0, false, 0));

/// Default [`Range`] of every proportion in percents: `[0, 100]`.
pub const DEFAULT_PERCENT: Range<Decimal> =
    Range::new(Decimal::ZERO, Decimal::ONE_HUNDRED);

/// Selection of inventory filters.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Filter {
    /// Selected [`Shape`]s.
    pub shapes: Vec<Shape>,

    /// Selected [`Color`]s.
    pub colors: Vec<Color>,

    /// Selected [`Clarity`] grades.
    pub clarities: Vec<Clarity>,

    /// Selected cut [`Grade`]s.
    pub cuts: Vec<Grade>,

    /// Selected polish [`Grade`]s.
    pub polishes: Vec<Grade>,

    /// Selected symmetry [`Grade`]s.
    pub symmetries: Vec<Grade>,

    /// Selected [`Fluorescence`] intensities.
    pub fluorescences: Vec<Fluorescence>,

    /// Selected grading [`Lab`]s.
    pub labs: Vec<Lab>,

    /// Carat weight [`Range`].
    pub carat: Range<Decimal>,

    /// Total price [`Range`].
    pub price: Range<Decimal>,

    /// Length [`Range`].
    pub length: Range<Decimal>,

    /// Width [`Range`].
    pub width: Range<Decimal>,

    /// Depth [`Range`].
    pub depth: Range<Decimal>,

    /// Depth percentage [`Range`].
    pub depth_percent: Range<Decimal>,

    /// Table percentage [`Range`].
    pub table_percent: Range<Decimal>,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            colors: Vec::new(),
            clarities: Vec::new(),
            cuts: Vec::new(),
            polishes: Vec::new(),
            symmetries: Vec::new(),
            fluorescences: Vec::new(),
            labs: Vec::new(),
            carat: DEFAULT_CARAT,
            price: DEFAULT_PRICE,
            length: DEFAULT_DIMENSION,
            width: DEFAULT_DIMENSION,
            depth: DEFAULT_DIMENSION,
            depth_percent: DEFAULT_PERCENT,
            table_percent: DEFAULT_PERCENT,
        }
    }
}

impl Filter {
    /// Toggles the provided [`Facet`] value.
    pub fn toggle(&mut self, facet: Facet) {
        match facet {
            Facet::Shape(v) => toggle(&mut self.shapes, v),
            Facet::Color(v) => toggle(&mut self.colors, v),
            Facet::Clarity(v) => toggle(&mut self.clarities, v),
            Facet::Cut(v) => toggle(&mut self.cuts, v),
            Facet::Polish(v) => toggle(&mut self.polishes, v),
            Facet::Symmetry(v) => toggle(&mut self.symmetries, v),
            Facet::Fluorescence(v) => toggle(&mut self.fluorescences, v),
            Facet::Lab(v) => toggle(&mut self.labs, v),
        }
    }

    /// Consuming version of [`Filter::toggle()`].
    #[must_use]
    pub fn with_toggled(mut self, facet: Facet) -> Self {
        self.toggle(facet);
        self
    }

    /// Replaces the [`Range`] identified by the provided [`RangeKey`].
    ///
    /// Bounds are taken as is: no clamping or reordering happens.
    pub fn set_range(&mut self, key: RangeKey, range: Range<Decimal>) {
        *self.range_mut(key) = range;
    }

    /// Consuming version of [`Filter::set_range()`].
    #[must_use]
    pub fn with_range(mut self, key: RangeKey, range: Range<Decimal>) -> Self {
        self.set_range(key, range);
        self
    }

    /// Restores every facet and [`Range`] to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Indicates whether any facet is selected or any [`Range`] differs from
    /// its default.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        FacetKind::ALL.iter().any(|k| !self.values(*k).is_empty())
            || RangeKey::ALL
                .iter()
                .any(|k| self.range(*k) != k.default_range())
    }

    /// Returns the [`Range`] identified by the provided [`RangeKey`].
    #[must_use]
    pub fn range(&self, key: RangeKey) -> Range<Decimal> {
        match key {
            RangeKey::Carat => self.carat,
            RangeKey::Price => self.price,
            RangeKey::Length => self.length,
            RangeKey::Width => self.width,
            RangeKey::Depth => self.depth,
            RangeKey::DepthPercent => self.depth_percent,
            RangeKey::TablePercent => self.table_percent,
        }
    }

    /// Returns the mutable [`Range`] identified by the provided [`RangeKey`].
    fn range_mut(&mut self, key: RangeKey) -> &mut Range<Decimal> {
        match key {
            RangeKey::Carat => &mut self.carat,
            RangeKey::Price => &mut self.price,
            RangeKey::Length => &mut self.length,
            RangeKey::Width => &mut self.width,
            RangeKey::Depth => &mut self.depth,
            RangeKey::DepthPercent => &mut self.depth_percent,
            RangeKey::TablePercent => &mut self.table_percent,
        }
    }

    /// Returns wire values selected for the provided [`FacetKind`], in the
    /// order they were selected.
    #[must_use]
    pub fn values(&self, kind: FacetKind) -> Vec<&'static str> {
        fn strs<K: Kind>(list: &[K]) -> Vec<&'static str> {
            list.iter().map(|v| v.as_str()).collect()
        }

        match kind {
            FacetKind::Shape => strs(&self.shapes),
            FacetKind::Color => strs(&self.colors),
            FacetKind::Clarity => strs(&self.clarities),
            FacetKind::Cut => strs(&self.cuts),
            FacetKind::Polish => strs(&self.polishes),
            FacetKind::Symmetry => strs(&self.symmetries),
            FacetKind::Fluorescence => strs(&self.fluorescences),
            FacetKind::Lab => strs(&self.labs),
        }
    }

    /// Indicates whether the provided [`Facet`] value is selected.
    #[must_use]
    pub fn is_selected(&self, facet: Facet) -> bool {
        match facet {
            Facet::Shape(v) => self.shapes.contains(&v),
            Facet::Color(v) => self.colors.contains(&v),
            Facet::Clarity(v) => self.clarities.contains(&v),
            Facet::Cut(v) => self.cuts.contains(&v),
            Facet::Polish(v) => self.polishes.contains(&v),
            Facet::Symmetry(v) => self.symmetries.contains(&v),
            Facet::Fluorescence(v) => self.fluorescences.contains(&v),
            Facet::Lab(v) => self.labs.contains(&v),
        }
    }
}

/// Adds the `item` to the `list` if it's absent there, or removes it
/// otherwise.
pub fn toggle<T: PartialEq>(list: &mut Vec<T>, item: T) {
    if let Some(pos) = list.iter().position(|v| *v == item) {
        _ = list.remove(pos);
    } else {
        list.push(item);
    }
}

/// Single value of a multi-select facet.
///
/// Represented as `{"facet": "color", "value": "D"}` on the wire.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "facet", content = "value", rename_all = "camelCase")]
pub enum Facet {
    /// [`Shape`] value.
    Shape(Shape),

    /// [`Color`] value.
    Color(Color),

    /// [`Clarity`] value.
    Clarity(Clarity),

    /// Cut [`Grade`] value.
    Cut(Grade),

    /// Polish [`Grade`] value.
    Polish(Grade),

    /// Symmetry [`Grade`] value.
    Symmetry(Grade),

    /// [`Fluorescence`] value.
    Fluorescence(Fluorescence),

    /// [`Lab`] value.
    Lab(Lab),
}

impl Facet {
    /// Parses a [`Facet`] value of the provided [`FacetKind`] from its wire
    /// representation.
    #[must_use]
    pub fn parse(kind: FacetKind, value: &str) -> Option<Self> {
        Some(match kind {
            FacetKind::Shape => Self::Shape(value.parse().ok()?),
            FacetKind::Color => Self::Color(value.parse().ok()?),
            FacetKind::Clarity => Self::Clarity(value.parse().ok()?),
            FacetKind::Cut => Self::Cut(value.parse().ok()?),
            FacetKind::Polish => Self::Polish(value.parse().ok()?),
            FacetKind::Symmetry => Self::Symmetry(value.parse().ok()?),
            FacetKind::Fluorescence => Self::Fluorescence(value.parse().ok()?),
            FacetKind::Lab => Self::Lab(value.parse().ok()?),
        })
    }

    /// Returns the [`FacetKind`] of this [`Facet`].
    #[must_use]
    pub const fn kind(self) -> FacetKind {
        match self {
            Self::Shape(_) => FacetKind::Shape,
            Self::Color(_) => FacetKind::Color,
            Self::Clarity(_) => FacetKind::Clarity,
            Self::Cut(_) => FacetKind::Cut,
            Self::Polish(_) => FacetKind::Polish,
            Self::Symmetry(_) => FacetKind::Symmetry,
            Self::Fluorescence(_) => FacetKind::Fluorescence,
            Self::Lab(_) => FacetKind::Lab,
        }
    }

    /// Returns every possible [`Facet`] value of the provided [`FacetKind`].
    #[must_use]
    pub fn options(kind: FacetKind) -> Vec<Self> {
        match kind {
            FacetKind::Shape => {
                Shape::ALL.iter().copied().map(Self::Shape).collect()
            }
            FacetKind::Color => {
                Color::ALL.iter().copied().map(Self::Color).collect()
            }
            FacetKind::Clarity => {
                Clarity::ALL.iter().copied().map(Self::Clarity).collect()
            }
            FacetKind::Cut => {
                Grade::ALL.iter().copied().map(Self::Cut).collect()
            }
            FacetKind::Polish => {
                Grade::ALL.iter().copied().map(Self::Polish).collect()
            }
            FacetKind::Symmetry => {
                Grade::ALL.iter().copied().map(Self::Symmetry).collect()
            }
            FacetKind::Fluorescence => Fluorescence::ALL
                .iter()
                .copied()
                .map(Self::Fluorescence)
                .collect(),
            FacetKind::Lab => Lab::ALL.iter().copied().map(Self::Lab).collect(),
        }
    }

    /// Returns the wire representation of this [`Facet`] value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shape(v) => v.as_str(),
            Self::Color(v) => v.as_str(),
            Self::Clarity(v) => v.as_str(),
            Self::Cut(v) | Self::Polish(v) | Self::Symmetry(v) => v.as_str(),
            Self::Fluorescence(v) => v.as_str(),
            Self::Lab(v) => v.as_str(),
        }
    }
}

define_kind! {
    #[doc = "Multi-select facet of a [`Filter`]."]
    enum FacetKind {
        #[doc = "[`Shape`] facet."]
        Shape = "shape",

        #[doc = "[`Color`] facet."]
        Color = "color",

        #[doc = "[`Clarity`] facet."]
        Clarity = "clarity",

        #[doc = "Cut [`Grade`] facet."]
        Cut = "cut",

        #[doc = "Polish [`Grade`] facet."]
        Polish = "polish",

        #[doc = "Symmetry [`Grade`] facet."]
        Symmetry = "symmetry",

        #[doc = "[`Fluorescence`] facet."]
        Fluorescence = "fluorescence",

        #[doc = "Grading [`Lab`] facet."]
        Lab = "lab",
    }
}

define_kind! {
    #[doc = "Numeric [`Range`] of a [`Filter`]."]
    enum RangeKey {
        #[doc = "Carat weight."]
        Carat = "carat",

        #[doc = "Total price."]
        Price = "price",

        #[doc = "Length in millimeters."]
        Length = "length",

        #[doc = "Width in millimeters."]
        Width = "width",

        #[doc = "Depth in millimeters."]
        Depth = "depth",

        #[doc = "Depth percentage."]
        DepthPercent = "depthPercent",

        #[doc = "Table percentage."]
        TablePercent = "tablePercent",
    }
}

impl RangeKey {
    /// Returns the default [`Range`] of this [`RangeKey`].
    #[must_use]
    pub const fn default_range(self) -> Range<Decimal> {
        match self {
            Self::Carat => DEFAULT_CARAT,
            Self::Price => DEFAULT_PRICE,
            Self::Length | Self::Width | Self::Depth => DEFAULT_DIMENSION,
            Self::DepthPercent | Self::TablePercent => DEFAULT_PERCENT,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{Kind as _, Range};
    use rust_decimal::Decimal;

    use crate::domain::diamond::{Color, Fluorescence, Grade, Lab, Shape};

    use super::{toggle, Facet, FacetKind, Filter, RangeKey, DEFAULT_CARAT};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn every_facet() -> Vec<Facet> {
        FacetKind::ALL
            .iter()
            .flat_map(|k| Facet::options(*k))
            .collect()
    }

    #[test]
    fn toggle_twice_restores_list() {
        let mut list = vec![Color::E, Color::G];
        toggle(&mut list, Color::D);
        assert_eq!(list, [Color::E, Color::G, Color::D]);
        toggle(&mut list, Color::D);
        assert_eq!(list, [Color::E, Color::G]);

        toggle(&mut list, Color::E);
        toggle(&mut list, Color::E);
        assert_eq!(list, [Color::G, Color::E]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn double_toggle_is_identity_for_every_facet() {
        let base = Filter::default()
            .with_toggled(Facet::Shape(Shape::Oval))
            .with_toggled(Facet::Lab(Lab::Igi));

        for facet in every_facet() {
            let toggled = base.clone().with_toggled(facet).with_toggled(facet);
            for kind in FacetKind::ALL {
                let mut expected = base.values(*kind);
                let mut actual = toggled.values(*kind);
                expected.sort_unstable();
                actual.sort_unstable();
                assert_eq!(actual, expected, "{facet:?}");
            }
        }
    }

    #[test]
    fn grades_are_toggled_per_facet() {
        let filter =
            Filter::default().with_toggled(Facet::Polish(Grade::Excellent));
        assert!(filter.is_selected(Facet::Polish(Grade::Excellent)));
        assert!(!filter.is_selected(Facet::Cut(Grade::Excellent)));
        assert!(!filter.is_selected(Facet::Symmetry(Grade::Excellent)));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut filter = Filter::default()
            .with_toggled(Facet::Color(Color::D))
            .with_range(RangeKey::Price, Range::new(dec("1000"), dec("5000")))
            .with_range(
                RangeKey::TablePercent,
                Range::new(dec("70"), dec("50")),
            );

        filter.reset();

        assert_eq!(filter, Filter::default());
        assert_eq!(filter.carat, DEFAULT_CARAT);
        assert!(filter.colors.is_empty());
    }

    #[test]
    fn set_range_does_not_clamp() {
        let filter = Filter::default()
            .with_range(RangeKey::Carat, Range::new(dec("3"), dec("1")));
        assert_eq!(filter.carat, Range::new(dec("3"), dec("1")));
    }

    #[test]
    fn defaults_are_inactive() {
        assert!(!Filter::default().has_active_filters());
        assert!(
            !Filter::default()
                .with_range(
                    RangeKey::Carat,
                    Range::new(dec("0.00"), dec("10.990")),
                )
                .has_active_filters(),
            "equal bounds written differently",
        );
    }

    #[test]
    fn any_single_change_is_active() {
        for facet in every_facet() {
            assert!(
                Filter::default().with_toggled(facet).has_active_filters(),
                "{facet:?}",
            );
        }
        for key in RangeKey::ALL {
            let default = key.default_range();
            let moved = Range::new(default.min + Decimal::ONE, default.max);
            assert!(
                Filter::default().with_range(*key, moved).has_active_filters(),
                "{key:?}",
            );
        }
    }

    #[test]
    fn parses_facets() {
        assert_eq!(
            Facet::parse(FacetKind::Color, "d"),
            Some(Facet::Color(Color::D)),
        );
        assert_eq!(
            Facet::parse(FacetKind::Cut, "EX"),
            Some(Facet::Cut(Grade::Excellent)),
        );
        assert_eq!(Facet::parse(FacetKind::Lab, "XYZ"), None);
        assert_eq!(Facet::Cut(Grade::VeryGood).kind(), FacetKind::Cut);
    }

    #[test]
    fn facet_wire_form() {
        let facet: Facet =
            serde_json::from_str(r#"{"facet":"cut","value":"VG"}"#).unwrap();
        assert_eq!(facet, Facet::Cut(Grade::VeryGood));
        assert_eq!(
            serde_json::to_value(Facet::Fluorescence(Fluorescence::Faint))
                .unwrap(),
            serde_json::json!({"facet": "fluorescence", "value": "FNT"}),
        );
    }

    #[test]
    fn serializes_as_plain_value() {
        let filter = Filter::default().with_toggled(Facet::Shape(Shape::Round));
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["shapes"], serde_json::json!(["ROUND"]));

        let back: Filter = serde_json::from_value(json).unwrap();
        assert_eq!(back, filter);

        let partial: Filter =
            serde_json::from_str(r#"{"colors":["E"]}"#).unwrap();
        assert_eq!(partial.colors, [Color::E]);
        assert_eq!(partial.carat, DEFAULT_CARAT);
    }
}
