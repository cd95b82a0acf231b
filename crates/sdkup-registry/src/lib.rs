mod client;
mod release_index;

pub use client::{ReleaseIndexClient, DEFAULT_RELEASES_INDEX_URL, RELEASES_INDEX_URL_ENV};
pub use release_index::{ReleaseIndex, ReleaseIndexEntry};

#[cfg(test)]
mod tests;
