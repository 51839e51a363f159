use super::movies::Genre;

// ── Recommendation bank ─────────────────────────────────────────────

/// A "movies you might also like" entry on the results page. The rating is
/// display text, not a number we compute with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub title: &'static str,
    pub year: &'static str,
    pub rating: &'static str,
    pub poster: &'static str,
}

static DRAMA_RECS: &[Recommendation] = &[
    Recommendation {
        title: "The Godfather",
        year: "1972",
        rating: "9.2",
        poster: "https://images.pexels.com/photos/2873486/pexels-photo-2873486.jpeg",
    },
    Recommendation {
        title: "Forrest Gump",
        year: "1994",
        rating: "8.8",
        poster: "https://images.pexels.com/photos/436413/pexels-photo-436413.jpeg",
    },
    Recommendation {
        title: "Schindler's List",
        year: "1993",
        rating: "9.0",
        poster: "https://images.pexels.com/photos/3894828/pexels-photo-3894828.jpeg",
    },
    Recommendation {
        title: "The Green Mile",
        year: "1999",
        rating: "8.6",
        poster: "https://images.pexels.com/photos/2873277/pexels-photo-2873277.jpeg",
    },
];

static ACTION_RECS: &[Recommendation] = &[
    Recommendation {
        title: "Die Hard",
        year: "1988",
        rating: "8.2",
        poster: "https://images.pexels.com/photos/2873486/pexels-photo-2873486.jpeg",
    },
    Recommendation {
        title: "The Matrix",
        year: "1999",
        rating: "8.7",
        poster: "https://images.pexels.com/photos/3075993/pexels-photo-3075993.jpeg",
    },
    Recommendation {
        title: "Mad Max: Fury Road",
        year: "2015",
        rating: "8.1",
        poster: "https://images.pexels.com/photos/2873277/pexels-photo-2873277.jpeg",
    },
    Recommendation {
        title: "John Wick",
        year: "2014",
        rating: "7.4",
        poster: "https://images.pexels.com/photos/7991634/pexels-photo-7991634.jpeg",
    },
];

static COMEDY_RECS: &[Recommendation] = &[
    Recommendation {
        title: "Superbad",
        year: "2007",
        rating: "7.6",
        poster: "https://images.pexels.com/photos/2873486/pexels-photo-2873486.jpeg",
    },
    Recommendation {
        title: "Bridesmaids",
        year: "2011",
        rating: "6.8",
        poster: "https://images.pexels.com/photos/436413/pexels-photo-436413.jpeg",
    },
    Recommendation {
        title: "Step Brothers",
        year: "2008",
        rating: "6.9",
        poster: "https://images.pexels.com/photos/3894828/pexels-photo-3894828.jpeg",
    },
    Recommendation {
        title: "Dumb and Dumber",
        year: "1994",
        rating: "7.3",
        poster: "https://images.pexels.com/photos/2873277/pexels-photo-2873277.jpeg",
    },
];

static HORROR_RECS: &[Recommendation] = &[
    Recommendation {
        title: "The Exorcist",
        year: "1973",
        rating: "8.1",
        poster: "https://images.pexels.com/photos/2873486/pexels-photo-2873486.jpeg",
    },
    Recommendation {
        title: "Hereditary",
        year: "2018",
        rating: "7.3",
        poster: "https://images.pexels.com/photos/3075993/pexels-photo-3075993.jpeg",
    },
    Recommendation {
        title: "A Quiet Place",
        year: "2018",
        rating: "7.5",
        poster: "https://images.pexels.com/photos/2873277/pexels-photo-2873277.jpeg",
    },
    Recommendation {
        title: "The Conjuring",
        year: "2013",
        rating: "7.5",
        poster: "https://images.pexels.com/photos/7991634/pexels-photo-7991634.jpeg",
    },
];

static SCIFI_RECS: &[Recommendation] = &[
    Recommendation {
        title: "Interstellar",
        year: "2014",
        rating: "8.6",
        poster: "https://images.pexels.com/photos/2873486/pexels-photo-2873486.jpeg",
    },
    Recommendation {
        title: "Blade Runner 2049",
        year: "2017",
        rating: "8.0",
        poster: "https://images.pexels.com/photos/3075993/pexels-photo-3075993.jpeg",
    },
    Recommendation {
        title: "Arrival",
        year: "2016",
        rating: "7.9",
        poster: "https://images.pexels.com/photos/2873277/pexels-photo-2873277.jpeg",
    },
    Recommendation {
        title: "Ex Machina",
        year: "2014",
        rating: "7.7",
        poster: "https://images.pexels.com/photos/7991634/pexels-photo-7991634.jpeg",
    },
];

static ROMANCE_RECS: &[Recommendation] = &[
    Recommendation {
        title: "Pride & Prejudice",
        year: "2005",
        rating: "7.8",
        poster: "https://images.pexels.com/photos/2873486/pexels-photo-2873486.jpeg",
    },
    Recommendation {
        title: "La La Land",
        year: "2016",
        rating: "8.0",
        poster: "https://images.pexels.com/photos/3075993/pexels-photo-3075993.jpeg",
    },
    Recommendation {
        title: "Before Sunrise",
        year: "1995",
        rating: "8.1",
        poster: "https://images.pexels.com/photos/2873277/pexels-photo-2873277.jpeg",
    },
    Recommendation {
        title: "Eternal Sunshine",
        year: "2004",
        rating: "8.3",
        poster: "https://images.pexels.com/photos/7991634/pexels-photo-7991634.jpeg",
    },
];

/// Returns the recommendation list for a result's genre string. Unknown
/// genres fall back to the Drama list, matching the product's behavior.
pub fn recommendations_for(genre: &str) -> &'static [Recommendation] {
    match Genre::parse(genre) {
        Some(Genre::Action) => ACTION_RECS,
        Some(Genre::Comedy) => COMEDY_RECS,
        Some(Genre::Horror) => HORROR_RECS,
        Some(Genre::SciFi) => SCIFI_RECS,
        Some(Genre::Romance) => ROMANCE_RECS,
        Some(Genre::Drama) | None => DRAMA_RECS,
    }
}

// ── Tests ───────────────────────────────────────────────────────────
