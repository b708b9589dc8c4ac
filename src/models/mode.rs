use serde::{Deserialize, Serialize};

/// Means of transport of a departure or of one segment of a route.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Tram,
    Bus,
    Subway,
    Suburban,
    Regional,
    National,
    Ferry,
    Taxi,
    Walking,
    #[default]
    Other,
}

impl Mode {
    /// Maps the `product` field of a HAFAS line onto a mode.
    pub fn from_product(product: &str) -> Self {
        match product {
            "tram" => Self::Tram,
            "bus" => Self::Bus,
            "subway" => Self::Subway,
            "suburban" => Self::Suburban,
            "regional" | "regionalExp" | "regionalExpress" => Self::Regional,
            "national" | "nationalExp" | "nationalExpress" => Self::National,
            "ferry" => Self::Ferry,
            "taxi" => Self::Taxi,
            "walking" => Self::Walking,
            _ => Self::Other,
        }
    }

    /// Hex color used when rendering a departure of this mode.
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Tram => "#E2001A",
            Self::Bus => "#005CA9",
            Self::Subway => "#0065AE",
            Self::Suburban => "#008D4F",
            Self::Regional => "#7B2C82",
            Self::National => "#EC0016",
            Self::Ferry => "#0098A1",
            Self::Taxi => "#F9B000",
            Self::Walking => "#9E9E9E",
            Self::Other => "#616161",
        }
    }

    pub const fn is_walking(&self) -> bool {
        matches!(self, Self::Walking)
    }
}

#[test]
fn product_mapping() {
    assert_eq!(Mode::from_product("tram"), Mode::Tram);
    assert_eq!(Mode::from_product("regionalExpress"), Mode::Regional);
    assert_eq!(Mode::from_product("nationalExpress"), Mode::National);
    assert_eq!(Mode::from_product("hovercraft"), Mode::Other);
}
