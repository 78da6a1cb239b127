use serde::Serialize;

use super::{Tool, ToolResult};

/// Static metadata for one catalogue entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MovieRecord {
    pub title: &'static str,
    pub genre: &'static str,
    pub runtime_minutes: u32,
    pub rating: f32,
}

/// Serialized result of a metadata lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataLookup {
    pub keyword: String,
    /// The bucket that matched, `None` for the "no data" record
    pub bucket: Option<&'static str>,
    pub movies: Vec<MovieRecord>,
    pub message: Option<String>,
}

const SCI_FI: &[MovieRecord] = &[
    MovieRecord {
        title: "Space Odyssey 2001",
        genre: "Sci-Fi/Drama",
        runtime_minutes: 149,
        rating: 8.3,
    },
    MovieRecord {
        title: "Robot Detective",
        genre: "Sci-Fi/Thriller",
        runtime_minutes: 115,
        rating: 7.5,
    },
    MovieRecord {
        title: "The Infinite Loop",
        genre: "Sci-Fi/Mystery",
        runtime_minutes: 180,
        rating: 9.1,
    },
];

const ACTION: &[MovieRecord] = &[
    MovieRecord {
        title: "The Fast Getaway",
        genre: "Action/Thriller",
        runtime_minutes: 95,
        rating: 7.8,
    },
    MovieRecord {
        title: "Mountain Commandos",
        genre: "Action/War",
        runtime_minutes: 122,
        rating: 8.0,
    },
];

const COMEDY: &[MovieRecord] = &[
    MovieRecord {
        title: "The Office Party",
        genre: "Comedy/Slice of Life",
        runtime_minutes: 88,
        rating: 6.9,
    },
    MovieRecord {
        title: "Wacky Neighbors",
        genre: "Comedy/Slapstick",
        runtime_minutes: 105,
        rating: 7.2,
    },
];

/// Keyword buckets in match order
pub const CATALOGUE: &[(&str, &[MovieRecord])] =
    &[("sci-fi", SCI_FI), ("action", ACTION), ("comedy", COMEDY)];

/// Find the bucket for a keyword
///
/// Exact matches win, then a bucket named inside the keyword ("sci-fi movies"), then a
/// keyword that is part of a bucket name ("comed"). Blank keywords never match.
pub fn lookup(keyword: &str) -> MetadataLookup {
    let normalized = keyword.trim().to_lowercase();

    let found = if normalized.is_empty() {
        None
    } else {
        CATALOGUE
            .iter()
            .find(|(bucket, _)| *bucket == normalized)
            .or_else(|| {
                CATALOGUE
                    .iter()
                    .find(|(bucket, _)| normalized.contains(bucket))
            })
            .or_else(|| {
                CATALOGUE
                    .iter()
                    .find(|(bucket, _)| bucket.contains(normalized.as_str()))
            })
    };

    match found {
        Some((bucket, movies)) => MetadataLookup {
            keyword: keyword.to_string(),
            bucket: Some(*bucket),
            movies: movies.to_vec(),
            message: None,
        },
        None => MetadataLookup {
            keyword: keyword.to_string(),
            bucket: None,
            movies: Vec::new(),
            message: Some(format!(
                "Could not find movies matching: {}. Try 'sci-fi', 'action', or 'comedy'.",
                keyword
            )),
        },
    }
}

/// Serialized metadata for a keyword; never fails, misses yield the "no data" record
pub fn fetch_movie_metadata(keyword: &str) -> String {
    let result = lookup(keyword);
    serde_json::to_string(&result).unwrap_or_else(|_| "{}".to_string())
}

pub struct MovieMetadataTool;

impl MovieMetadataTool {
    pub const NAME: &'static str = "fetch_movie_metadata";
}

impl Tool for MovieMetadataTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Retrieve movie metadata (title, genre, rating, runtime) for a preference keyword \
         such as 'sci-fi', 'action' or 'comedy'. Input is the keyword."
    }

    fn call(&self, input: &str) -> ToolResult<String> {
        Ok(fetch_movie_metadata(input))
    }
}
