//! Expansion state and memoized album lists for the current result set

use std::collections::{HashMap, HashSet};

use super::content::AlbumSummary;
use super::types::ItemKey;

/// Albums of one artist: absent until fetched, loading while in flight
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlbumEntry {
    pub loading: bool,
    pub albums: Option<Vec<AlbumSummary>>,
}

/// Admission to fetch the albums of `artist_id`, bound to a result set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub artist_id: i64,
    generation: u64,
}

#[derive(Clone, Debug, Default)]
pub struct ExpansionCache {
    expanded: HashSet<ItemKey>,
    albums: HashMap<i64, AlbumEntry>,
    generation: u64,
}

impl ExpansionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the presentation flag, returning the new state. Never fetches.
    pub fn toggle(&mut self, key: ItemKey) -> bool {
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    pub fn is_expanded(&self, key: &ItemKey) -> bool {
        self.expanded.contains(key)
    }

    pub fn entry(&self, artist_id: i64) -> Option<&AlbumEntry> {
        self.albums.get(&artist_id)
    }

    pub fn albums(&self, artist_id: i64) -> Option<&[AlbumSummary]> {
        self.albums.get(&artist_id)?.albums.as_deref()
    }

    pub fn album(&self, artist_id: i64, album_id: i64) -> Option<&AlbumSummary> {
        self.albums(artist_id)?.iter().find(|a| a.album_id == album_id)
    }

    pub fn is_loading(&self, artist_id: i64) -> bool {
        self.albums.get(&artist_id).is_some_and(|e| e.loading)
    }

    /// Starts a fetch unless one was already issued for this artist in the
    /// current result set, whether it finished or not.
    pub fn begin_fetch(&mut self, artist_id: i64) -> Option<FetchTicket> {
        if self.albums.contains_key(&artist_id) {
            return None;
        }
        self.albums.insert(artist_id, AlbumEntry { loading: true, albums: None });
        Some(FetchTicket { artist_id, generation: self.generation })
    }

    /// Stores a fetched list. Returns `false` if the ticket is stale.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, albums: Vec<AlbumSummary>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.albums.insert(
            ticket.artist_id,
            AlbumEntry { loading: false, albums: Some(albums) },
        );
        true
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
        self.albums.clear();
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Category;

    fn album(id: i64) -> AlbumSummary {
        AlbumSummary {
            album_id: id,
            title: format!("Album {id}"),
            year: None,
            in_library: false,
            monitored: false,
            track_file_count: 0,
            total_track_count: 12,
        }
    }

    #[test]
    fn toggle_flips_without_touching_albums() {
        let mut cache = ExpansionCache::new();
        let key = ItemKey::new(Category::Artist, 1);

        assert!(cache.toggle(key));
        assert!(cache.is_expanded(&key));
        assert!(!cache.toggle(key));
        assert!(cache.entry(1).is_none());
    }

    #[test]
    fn fetch_is_admitted_once_even_while_loading() {
        let mut cache = ExpansionCache::new();
        let ticket = cache.begin_fetch(1).unwrap();
        assert!(cache.is_loading(1));
        assert!(cache.begin_fetch(1).is_none());

        assert!(cache.finish_fetch(ticket, vec![album(10), album(11)]));
        assert!(!cache.is_loading(1));
        assert!(cache.begin_fetch(1).is_none());
        assert_eq!(cache.album(1, 11).map(|a| a.album_id), Some(11));
    }

    #[test]
    fn empty_list_still_counts_as_fetched() {
        let mut cache = ExpansionCache::new();
        let ticket = cache.begin_fetch(3).unwrap();
        cache.finish_fetch(ticket, Vec::new());

        assert_eq!(cache.albums(3), Some(&[][..]));
        assert!(cache.begin_fetch(3).is_none());
    }

    #[test]
    fn clear_drops_entries_and_stale_fetches() {
        let mut cache = ExpansionCache::new();
        let key = ItemKey::new(Category::Artist, 1);
        cache.toggle(key);
        let ticket = cache.begin_fetch(1).unwrap();

        cache.clear();
        assert!(!cache.is_expanded(&key));
        assert!(!cache.finish_fetch(ticket, vec![album(10)]));
        assert!(cache.entry(1).is_none());
        assert!(cache.begin_fetch(1).is_some());
    }
}
