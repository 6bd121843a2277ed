pub mod genre;
pub mod intent;
pub mod movie;
pub mod page;
pub mod session;
pub mod status;
pub mod watchlist;

pub use genre::{genre_id, genre_name, primary_genre, GENRES};
pub use intent::{BrowseQuery, FeaturedIntent, GenreFilter, ParseFilterError, RatingFilter, TimeWindow, YearFilter};
pub use movie::{CastMember, Genre, Movie, MovieDetails, MovieId, Trailer};
pub use page::MoviePage;
pub use session::{Identity, Session};
pub use status::LoadStatus;
pub use watchlist::WatchlistEntry;
