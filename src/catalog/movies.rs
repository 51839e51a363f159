use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

// ── Genres ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Drama,
    Action,
    Comedy,
    Horror,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Romance,
}

impl Genre {
    /// Every genre, in the order the product lists them.
    pub const ALL: [Genre; 6] = [
        Genre::Drama,
        Genre::Action,
        Genre::Comedy,
        Genre::Horror,
        Genre::SciFi,
        Genre::Romance,
    ];

    /// The genre a fresh wizard run starts with.
    pub const DEFAULT: Genre = Genre::Drama;

    /// The display key, which is also what the client sends back.
    pub fn label(self) -> &'static str {
        match self {
            Genre::Drama => "Drama",
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Horror => "Horror",
            Genre::SciFi => "Sci-Fi",
            Genre::Romance => "Romance",
        }
    }

    /// Parse a client-supplied genre key. Unknown keys yield `None` so
    /// callers can treat them as a no-op instead of crashing.
    pub fn parse(label: &str) -> Option<Genre> {
        Genre::ALL.iter().copied().find(|g| g.label() == label)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Movie catalog ───────────────────────────────────────────────────

/// A catalog movie. All fields are display data; the poster is a fixed
/// stock-image URL carried through to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movie {
    pub title: &'static str,
    pub year: &'static str,
    pub duration: &'static str,
    pub poster: &'static str,
}

static DRAMA_MOVIES: &[Movie] = &[
    Movie {
        title: "The Shawshank Redemption",
        year: "1994",
        duration: "142 min",
        poster: "https://images.pexels.com/photos/436413/pexels-photo-436413.jpeg",
    },
    Movie {
        title: "The Godfather",
        year: "1972",
        duration: "175 min",
        poster: "https://images.pexels.com/photos/2873486/pexels-photo-2873486.jpeg",
    },
    Movie {
        title: "Schindler's List",
        year: "1993",
        duration: "195 min",
        poster: "https://images.pexels.com/photos/3894828/pexels-photo-3894828.jpeg",
    },
    Movie {
        title: "Forrest Gump",
        year: "1994",
        duration: "142 min",
        poster: "https://images.pexels.com/photos/2873277/pexels-photo-2873277.jpeg",
    },
    Movie {
        title: "The Green Mile",
        year: "1999",
        duration: "189 min",
        poster: "https://images.pexels.com/photos/3075993/pexels-photo-3075993.jpeg",
    },
];

static ACTION_MOVIES: &[Movie] = &[
    Movie {
        title: "The Dark Knight",
        year: "2008",
        duration: "152 min",
        poster: "https://images.pexels.com/photos/2873486/pexels-photo-2873486.jpeg",
    },
    Movie {
        title: "Inception",
        year: "2010",
        duration: "148 min",
        poster: "https://images.pexels.com/photos/3075993/pexels-photo-3075993.jpeg",
    },
    Movie {
        title: "Mad Max: Fury Road",
        year: "2015",
        duration: "120 min",
        poster: "https://images.pexels.com/photos/2873277/pexels-photo-2873277.jpeg",
    },
    Movie {
        title: "Die Hard",
        year: "1988",
        duration: "132 min",
        poster: "https://images.pexels.com/photos/436413/pexels-photo-436413.jpeg",
    },
    Movie {
        title: "John Wick",
        year: "2014",
        duration: "101 min",
        poster: "https://images.pexels.com/photos/7991634/pexels-photo-7991634.jpeg",
    },
];

static COMEDY_MOVIES: &[Movie] = &[
    Movie {
        title: "The Hangover",
        year: "2009",
        duration: "100 min",
        poster: "https://images.pexels.com/photos/7991634/pexels-photo-7991634.jpeg",
    },
    Movie {
        title: "Superbad",
        year: "2007",
        duration: "113 min",
        poster: "https://images.pexels.com/photos/2873486/pexels-photo-2873486.jpeg",
    },
    Movie {
        title: "Bridesmaids",
        year: "2011",
        duration: "125 min",
        poster: "https://images.pexels.com/photos/436413/pexels-photo-436413.jpeg",
    },
    Movie {
        title: "Step Brothers",
        year: "2008",
        duration: "98 min",
        poster: "https://images.pexels.com/photos/3894828/pexels-photo-3894828.jpeg",
    },
    Movie {
        title: "Dumb and Dumber",
        year: "1994",
        duration: "107 min",
        poster: "https://images.pexels.com/photos/2873277/pexels-photo-2873277.jpeg",
    },
];

static HORROR_MOVIES: &[Movie] = &[
    Movie {
        title: "The Shining",
        year: "1980",
        duration: "146 min",
        poster: "https://images.pexels.com/photos/2873277/pexels-photo-2873277.jpeg",
    },
    Movie {
        title: "The Exorcist",
        year: "1973",
        duration: "122 min",
        poster: "https://images.pexels.com/photos/2873486/pexels-photo-2873486.jpeg",
    },
    Movie {
        title: "Hereditary",
        year: "2018",
        duration: "127 min",
        poster: "https://images.pexels.com/photos/3075993/pexels-photo-3075993.jpeg",
    },
    Movie {
        title: "A Quiet Place",
        year: "2018",
        duration: "90 min",
        poster: "https://images.pexels.com/photos/2873277/pexels-photo-2873277.jpeg",
    },
    Movie {
        title: "The Conjuring",
        year: "2013",
        duration: "112 min",
        poster: "https://images.pexels.com/photos/7991634/pexels-photo-7991634.jpeg",
    },
];

static SCIFI_MOVIES: &[Movie] = &[
    Movie {
        title: "Inception",
        year: "2010",
        duration: "148 min",
        poster: "https://images.pexels.com/photos/3075993/pexels-photo-3075993.jpeg",
    },
    Movie {
        title: "Interstellar",
        year: "2014",
        duration: "169 min",
        poster: "https://images.pexels.com/photos/2873486/pexels-photo-2873486.jpeg",
    },
    Movie {
        title: "Blade Runner 2049",
        year: "2017",
        duration: "164 min",
        poster: "https://images.pexels.com/photos/3075993/pexels-photo-3075993.jpeg",
    },
    Movie {
        title: "Arrival",
        year: "2016",
        duration: "116 min",
        poster: "https://images.pexels.com/photos/2873277/pexels-photo-2873277.jpeg",
    },
    Movie {
        title: "Ex Machina",
        year: "2014",
        duration: "108 min",
        poster: "https://images.pexels.com/photos/7991634/pexels-photo-7991634.jpeg",
    },
];

static ROMANCE_MOVIES: &[Movie] = &[
    Movie {
        title: "The Notebook",
        year: "2004",
        duration: "123 min",
        poster: "https://images.pexels.com/photos/3894828/pexels-photo-3894828.jpeg",
    },
    Movie {
        title: "Pride & Prejudice",
        year: "2005",
        duration: "129 min",
        poster: "https://images.pexels.com/photos/2873486/pexels-photo-2873486.jpeg",
    },
    Movie {
        title: "La La Land",
        year: "2016",
        duration: "128 min",
        poster: "https://images.pexels.com/photos/3075993/pexels-photo-3075993.jpeg",
    },
    Movie {
        title: "Before Sunrise",
        year: "1995",
        duration: "101 min",
        poster: "https://images.pexels.com/photos/2873277/pexels-photo-2873277.jpeg",
    },
    Movie {
        title: "Eternal Sunshine",
        year: "2004",
        duration: "108 min",
        poster: "https://images.pexels.com/photos/7991634/pexels-photo-7991634.jpeg",
    },
];

/// Returns the five catalog movies for a genre.
pub fn movies_for(genre: Genre) -> &'static [Movie] {
    match genre {
        Genre::Drama => DRAMA_MOVIES,
        Genre::Action => ACTION_MOVIES,
        Genre::Comedy => COMEDY_MOVIES,
        Genre::Horror => HORROR_MOVIES,
        Genre::SciFi => SCIFI_MOVIES,
        Genre::Romance => ROMANCE_MOVIES,
    }
}

/// Pick one movie at random from a genre's bank.
pub fn random_movie(genre: Genre) -> Movie {
    pick_movie(genre, &mut rand::thread_rng())
}

/// Pick one movie from a genre's bank using the caller's RNG.
pub fn pick_movie<R: Rng>(genre: Genre, rng: &mut R) -> Movie {
    let bank = movies_for(genre);
    bank[rng.gen_range(0..bank.len())]
}

// ── Tests ───────────────────────────────────────────────────────────
