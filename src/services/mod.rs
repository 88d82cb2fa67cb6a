pub mod accounts;
pub mod movie_search;
pub mod providers;
pub mod results;
pub mod session;
pub mod similar;
pub mod validation;
pub mod watch_list;

pub use accounts::AccountRegistry;
pub use movie_search::SearchEngine;
pub use results::{ResultBoard, ResultSet, ResultSlot};
pub use session::SessionState;
pub use similar::SimilarTitles;
pub use watch_list::WatchList;
