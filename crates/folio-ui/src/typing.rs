pub const PHRASES: [&str; 4] = ["Frontend Developer", "Web Designer", "UI/UX Designer", "Problem Solver"];

const TYPE_MS: u64 = 100;
const DELETE_MS: u64 = 50;
const HOLD_FULL_MS: u64 = 2000;
const HOLD_EMPTY_MS: u64 = 500;

/// Types each phrase out, holds it, deletes it, then moves to the next.
#[derive(Debug, Clone)]
pub struct TypingEffect {
    phrases: Vec<Vec<char>>,
    phrase: usize,
    chars: usize,
    deleting: bool,
    text: String,
}

impl Default for TypingEffect {
    fn default() -> Self {
        Self::new(PHRASES).expect("built-in phrases are non-empty")
    }
}

impl TypingEffect {
    /// `None` if there are no phrases or any phrase is empty.
    pub fn new<I, S>(phrases: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<Vec<char>> = phrases
            .into_iter()
            .map(|p| p.as_ref().chars().collect())
            .collect();
        if phrases.is_empty() || phrases.iter().any(Vec::is_empty) {
            return None;
        }
        Some(Self {
            phrases,
            phrase: 0,
            chars: 0,
            deleting: false,
            text: String::new(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    /// Advance one step. Returns the delay until the next step.
    pub fn tick(&mut self) -> u64 {
        let current = &self.phrases[self.phrase];

        if self.deleting {
            self.chars -= 1;
        } else {
            self.chars += 1;
        }
        self.text = current[..self.chars].iter().collect();

        if !self.deleting && self.chars == current.len() {
            self.deleting = true;
            HOLD_FULL_MS
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
            HOLD_EMPTY_MS
        } else if self.deleting {
            DELETE_MS
        } else {
            TYPE_MS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_holds_deletes_and_moves_on() {
        let mut t = TypingEffect::new(["ab", "c"]).unwrap();

        assert_eq!(t.tick(), 100);
        assert_eq!(t.text(), "a");
        assert_eq!(t.tick(), 2000);
        assert_eq!(t.text(), "ab");
        assert_eq!(t.tick(), 50);
        assert_eq!(t.text(), "a");
        assert_eq!(t.tick(), 500);
        assert_eq!(t.text(), "");
        assert_eq!(t.phrase_index(), 1);

        assert_eq!(t.tick(), 2000);
        assert_eq!(t.text(), "c");
        assert_eq!(t.tick(), 500);
        assert_eq!(t.phrase_index(), 0);
    }

    #[test]
    fn handles_multibyte_text() {
        let mut t = TypingEffect::new(["héllo"]).unwrap();
        t.tick();
        t.tick();
        assert_eq!(t.text(), "hé");
    }

    #[test]
    fn rejects_empty_input() {
        assert!(TypingEffect::new(Vec::<String>::new()).is_none());
        assert!(TypingEffect::new(["ok", ""]).is_none());
    }

    #[test]
    fn default_cycles_through_all_phrases() {
        let mut t = TypingEffect::default();
        let mut seen = vec![];
        for _ in 0..200 {
            if t.tick() == 2000 {
                seen.push(t.text().to_string());
            }
        }
        assert_eq!(&seen[..4], &PHRASES);
    }
}
