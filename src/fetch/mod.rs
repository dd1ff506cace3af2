pub mod feed;

pub use feed::download_feed;
