// Year slider: purely visual filters on the comparison images, by era band.

use serde::Serialize;

pub const YEAR_MIN: i32 = 1900;
pub const YEAR_MAX: i32 = 2025;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum YearBand {
    /// Up to 1939.
    Colonial,
    /// 1940 to 1969.
    MidCentury,
    /// 1970 onwards.
    Contemporary,
}

impl YearBand {
    pub fn for_year(year: i32) -> Self {
        if year <= 1939 {
            YearBand::Colonial
        } else if year <= 1969 {
            YearBand::MidCentury
        } else {
            YearBand::Contemporary
        }
    }
}

/// A CSS filter: sepia with optional contrast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageFilter {
    pub sepia: f32,
    pub contrast: Option<f32>,
}

impl ImageFilter {
    pub const NONE: ImageFilter = ImageFilter {
        sepia: 0.0,
        contrast: None,
    };

    const fn sepia(amount: f32) -> Self {
        ImageFilter {
            sepia: amount,
            contrast: None,
        }
    }

    pub fn to_css(&self) -> String {
        match (self.sepia, self.contrast) {
            (s, None) if s == 0.0 => "none".to_string(),
            (s, None) => format!("sepia({})", s),
            (s, Some(c)) => format!("sepia({}) contrast({})", s, c),
        }
    }
}

/// Filters for the old and modern images at a given year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearEffect {
    pub year: i32,
    pub band: YearBand,
    pub old: ImageFilter,
    pub modern: ImageFilter,
}

impl YearEffect {
    /// Stateless: the same year always yields the same effect.
    pub fn for_year(year: i32) -> Self {
        let year = year.clamp(YEAR_MIN, YEAR_MAX);
        let band = YearBand::for_year(year);
        let (old, modern) = match band {
            YearBand::Colonial => (
                ImageFilter {
                    sepia: 0.6,
                    contrast: Some(0.85),
                },
                ImageFilter::sepia(0.5),
            ),
            YearBand::MidCentury => (ImageFilter::sepia(0.3), ImageFilter::sepia(0.2)),
            YearBand::Contemporary => (ImageFilter::NONE, ImageFilter::NONE),
        };
        YearEffect {
            year,
            band,
            old,
            modern,
        }
    }
}
