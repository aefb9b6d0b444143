use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Good,
    Acceptable,
    Poor,
    VeryPoor,
}

impl Quality {
    pub fn css_class(self) -> &'static str {
        match self {
            Quality::Good => "quality-good",
            Quality::Acceptable => "quality-acceptable",
            Quality::Poor | Quality::VeryPoor => "quality-poor",
        }
    }
}

/// A quality band with the label shown next to the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub quality: Quality,
    pub label: &'static str,
    pub class: &'static str,
}

impl Rating {
    fn new(quality: Quality, label: &'static str) -> Self {
        Self {
            quality,
            label,
            class: quality.css_class(),
        }
    }
}

pub fn whipple(value: f64) -> Rating {
    if value < 1.05 {
        Rating::new(Quality::Good, "Excellente qualité")
    } else if value < 1.25 {
        Rating::new(Quality::Acceptable, "Qualité acceptable")
    } else {
        Rating::new(Quality::Poor, "Attraction importante")
    }
}

pub fn myers(value: f64) -> Rating {
    if value < 5.0 {
        Rating::new(Quality::Good, "Très bonne qualité")
    } else if value < 10.0 {
        Rating::new(Quality::Acceptable, "Qualité acceptable")
    } else if value < 20.0 {
        Rating::new(Quality::Poor, "Qualité médiocre")
    } else {
        Rating::new(Quality::VeryPoor, "Très mauvaise qualité")
    }
}

pub fn icnu(value: f64) -> Rating {
    if value < 20.0 {
        Rating::new(Quality::Good, "Bonne qualité")
    } else if value < 40.0 {
        Rating::new(Quality::Acceptable, "Qualité acceptable")
    } else {
        Rating::new(Quality::Poor, "Qualité médiocre")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whipple_bands_are_lower_inclusive() {
        assert_eq!(whipple(1.0).quality, Quality::Good);
        assert_eq!(whipple(1.0499).quality, Quality::Good);
        assert_eq!(whipple(1.05).quality, Quality::Acceptable);
        assert_eq!(whipple(1.2499).quality, Quality::Acceptable);
        assert_eq!(whipple(1.25).quality, Quality::Poor);
        assert_eq!(whipple(1.25).label, "Attraction importante");
    }

    #[test]
    fn myers_has_four_bands() {
        assert_eq!(myers(4.99).quality, Quality::Good);
        assert_eq!(myers(5.0).quality, Quality::Acceptable);
        assert_eq!(myers(10.0).quality, Quality::Poor);
        assert_eq!(myers(19.999).label, "Qualité médiocre");
        assert_eq!(myers(20.0).quality, Quality::VeryPoor);
        assert_eq!(myers(20.0).class, "quality-poor");
    }

    #[test]
    fn icnu_bands() {
        assert_eq!(icnu(19.9).class, "quality-good");
        assert_eq!(icnu(20.0).class, "quality-acceptable");
        assert_eq!(icnu(39.99).quality, Quality::Acceptable);
        assert_eq!(icnu(40.0).quality, Quality::Poor);
        assert_eq!(icnu(-3.0).quality, Quality::Good);
    }
}
