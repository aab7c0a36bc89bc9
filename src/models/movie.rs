use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// TMDB identifier of a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A movie as stored in the catalog file
///
/// Extra fields in the file (genres, overview, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawMovie {
    pub movie_id: MovieId,
    pub title: String,
}

/// A catalog entry with its display title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
}

impl From<RawMovie> for MovieRecord {
    fn from(raw: RawMovie) -> Self {
        Self {
            id: raw.movie_id,
            title: display_title(&raw.title),
        }
    }
}

/// Converts a raw catalog title into the form shown to users
///
/// The first cased letter of every run of cased letters is title-cased and the
/// rest lower-cased. Anything without case (space, digit, apostrophe, CJK)
/// ends the run, so `"se7en"` becomes `"Se7En"` and `"日本abc"` becomes
/// `"日本Abc"`.
pub fn display_title(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_word = false;

    for c in raw.chars() {
        if is_cased(c) {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                push_titlecase(&mut out, c);
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || titlecase_of(c).is_some_and(|t| t == c)
}

/// Single-char titlecase mapping for letters whose titlecase differs from uppercase
fn titlecase_of(c: char) -> Option<char> {
    let mapped = match c {
        // Latin digraphs: DŽ Dž dž, LJ Lj lj, NJ Nj nj, DZ Dz dz
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}',
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}',
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}',
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}',
        // Greek letters with ypogegrammeni / prosgegrammeni
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            char::from_u32(c as u32 + 8)?
        }
        '\u{1F88}'..='\u{1F8F}' | '\u{1F98}'..='\u{1F9F}' | '\u{1FA8}'..='\u{1FAF}' => c,
        '\u{1FB3}' | '\u{1FBC}' => '\u{1FBC}',
        '\u{1FC3}' | '\u{1FCC}' => '\u{1FCC}',
        '\u{1FF3}' | '\u{1FFC}' => '\u{1FFC}',
        _ => return None,
    };
    Some(mapped)
}

fn push_titlecase(out: &mut String, c: char) {
    match titlecase_of(c) {
        Some(t) => out.push(t),
        None => out.extend(c.to_uppercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_capitalizes_words() {
        assert_eq!(display_title("the dark knight"), "The Dark Knight");
        assert_eq!(display_title("AVATAR"), "Avatar");
        assert_eq!(display_title("a"), "A");
    }

    #[test]
    fn test_display_title_non_letters_start_new_word() {
        assert_eq!(display_title("se7en"), "Se7En");
        assert_eq!(display_title("schindler's list"), "Schindler'S List");
        assert_eq!(display_title("spider-man 3"), "Spider-Man 3");
    }

    #[test]
    fn test_display_title_uncased_letters_split_words() {
        assert_eq!(display_title("日本abc"), "日本Abc");
        assert_eq!(display_title("君の名は your name"), "君の名は Your Name");
    }

    #[test]
    fn test_display_title_uses_titlecase_digraphs() {
        assert_eq!(display_title("\u{01C6}emal"), "\u{01C5}emal");
        assert_eq!(display_title("\u{01C4}EMAL"), "\u{01C5}emal");
        assert_eq!(display_title("\u{01C9}ubljana"), "\u{01C8}ubljana");
        assert_eq!(display_title("a \u{01C5}"), "A \u{01C5}");
    }

    #[test]
    fn test_display_title_is_idempotent() {
        let once = display_title("the lord of the rings: the two towers");
        assert_eq!(display_title(&once), once);
    }

    #[test]
    fn test_display_title_keeps_whitespace() {
        assert_eq!(display_title("  up  "), "  Up  ");
        assert_eq!(display_title(""), "");
    }

    #[test]
    fn test_raw_movie_ignores_extra_fields() {
        let json = r#"{"movie_id": 19995, "title": "avatar", "tags": "action sci-fi"}"#;
        let raw: RawMovie = serde_json::from_str(json).unwrap();
        let record = MovieRecord::from(raw);

        assert_eq!(record.id, MovieId(19995));
        assert_eq!(record.title, "Avatar");
    }

    #[test]
    fn test_movie_id_display() {
        assert_eq!(format!("{}", MovieId(285)), "285");
    }
}
