use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// A spelled pitch: letter name, accidental and octave.
///
/// Equality is pitch identity as the detector sees it: `C4` and `C3` differ,
/// and so do the enharmonic spellings `C#4` and `Db4`. The octave is the
/// written one, so `Cb4` sounds like `B3` but keeps octave 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    letter: Letter,
    accidental: Accidental,
    octave: i8, // Standard scientific pitch notation (4 = middle C)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Accidental {
    Flat,
    Natural,
    Sharp,
}

impl Letter {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    fn semitone(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
            Letter::A => "A",
            Letter::B => "B",
        }
    }
}

impl Accidental {
    fn symbol(self) -> &'static str {
        match self {
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
        }
    }
}

impl Note {
    /// Chromatic pitch class (0-11); `Cb` is 11 and `B#` is 0
    pub fn pitch_class(&self) -> u8 {
        let base = self.letter.semitone();
        match self.accidental {
            Accidental::Flat => (base + 11) % 12,
            Accidental::Natural => base,
            Accidental::Sharp => (base + 1) % 12,
        }
    }

    /// Written octave in scientific pitch notation
    pub fn octave(&self) -> i8 {
        self.octave
    }
}

impl FromStr for Note {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.char_indices().peekable();

        let letter = match chars.next() {
            Some((_, c)) => {
                Letter::from_char(c).ok_or_else(|| anyhow!("Invalid note name: {}", s))?
            }
            None => return Err(anyhow!("Empty note name")),
        };

        // Optional accidental right after the letter
        let mut name_end = 1;
        let mut accidental = Accidental::Natural;
        if let Some(&(idx, c)) = chars.peek() {
            let parsed = match c {
                '#' | 's' | 'S' => Some(Accidental::Sharp),
                'b' => Some(Accidental::Flat),
                _ => None,
            };
            if let Some(parsed) = parsed {
                accidental = parsed;
                name_end = idx + c.len_utf8();
            }
        }

        let octave_part = &s[name_end..];
        let octave = if octave_part.is_empty() {
            4
        } else {
            octave_part
                .parse::<i8>()
                .map_err(|_| anyhow!("Invalid octave: {}", octave_part))?
        };

        Ok(Note {
            letter,
            accidental,
            octave,
        })
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.letter.name(),
            self.accidental.symbol(),
            self.octave
        )
    }
}
