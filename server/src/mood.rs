/// A canned keyword query for a point on the 0..=100 mood slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mood {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

const HAPPY: Mood = Mood { label: "Happy", keywords: &["feel-good comedy", "uplifting", "family"] };
const ROMANTIC: Mood = Mood { label: "Romantic", keywords: &["romance drama", "romantic comedy", "love story"] };
const NOSTALGIC: Mood = Mood { label: "Nostalgic", keywords: &["classic adventure", "coming-of-age", "nostalgia"] };
const DARK: Mood = Mood { label: "Dark", keywords: &["psychological thriller", "crime drama", "noir"] };
const INTENSE: Mood = Mood { label: "Intense", keywords: &["action sci-fi", "high stakes", "survival"] };

impl Mood {
    pub fn for_level(level: u32) -> Mood {
        match level {
            0..=19 => HAPPY,
            20..=39 => ROMANTIC,
            40..=59 => NOSTALGIC,
            60..=79 => DARK,
            _ => INTENSE,
        }
    }

    pub fn query(&self) -> String {
        self.keywords.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets() {
        assert_eq!(Mood::for_level(0).label, "Happy");
        assert_eq!(Mood::for_level(20).label, "Romantic");
        assert_eq!(Mood::for_level(59).label, "Nostalgic");
        assert_eq!(Mood::for_level(79).label, "Dark");
        assert_eq!(Mood::for_level(500).label, "Intense");
        assert_eq!(Mood::for_level(85).query(), "action sci-fi high stakes survival");
    }
}
