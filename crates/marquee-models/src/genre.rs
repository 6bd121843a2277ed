/// The catalog's fixed movie genre list (id, display name)
pub const GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

pub fn genre_name(id: u32) -> &'static str {
    GENRES
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, name)| *name)
        .unwrap_or("Unknown")
}

/// Look up a genre id by display name (case-insensitive)
pub fn genre_id(name: &str) -> Option<u32> {
    GENRES
        .iter()
        .find(|(_, genre)| genre.eq_ignore_ascii_case(name.trim()))
        .map(|(id, _)| *id)
}

/// Name of the first (most relevant) genre, "Unknown" when there is none
pub fn primary_genre(genre_ids: &[u32]) -> &'static str {
    genre_ids.first().map(|id| genre_name(*id)).unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_lookup_both_ways() {
        assert_eq!(genre_name(878), "Science Fiction");
        assert_eq!(genre_name(1), "Unknown");
        assert_eq!(genre_id("science fiction"), Some(878));
        assert_eq!(genre_id("Polka"), None);
    }

    #[test]
    fn test_primary_genre_uses_first_id() {
        assert_eq!(primary_genre(&[27, 53]), "Horror");
        assert_eq!(primary_genre(&[]), "Unknown");
    }
}
