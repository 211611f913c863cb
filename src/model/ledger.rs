//! Request lifecycle tracking and request payload construction

use std::collections::HashMap;

use crate::error::ChannelResult;

use super::content::{AlbumSummary, CatalogItem, ItemDetails};
use super::request_channel::{MediaRequest, RequestOutcome, SeasonRequest};
use super::types::{Category, RequestKey, RequestStatus};

/// Status shown when the channel itself failed
pub const CONNECTION_ERROR: &str = "connection error";
/// Status shown when the backend refused without saying why
pub const GENERIC_REQUEST_ERROR: &str = "Request failed";

/// Proof that a submission was admitted by the ledger.
///
/// Carries the generation of the result set it was issued against so a
/// completion arriving after the results were replaced is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitTicket {
    pub key: RequestKey,
    generation: u64,
}

#[derive(Clone, Debug, Default)]
pub struct RequestLedger {
    statuses: HashMap<RequestKey, RequestStatus>,
    generation: u64,
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, key: &RequestKey) -> RequestStatus {
        self.statuses.get(key).cloned().unwrap_or_default()
    }

    pub fn in_flight(&self) -> usize {
        self.statuses.values().filter(|s| s.is_requesting()).count()
    }

    /// Marks `key` as `Requesting`. Returns `None` when a request for the same
    /// key is still outstanding; duplicates are dropped, not queued.
    pub fn begin(&mut self, key: RequestKey) -> Option<SubmitTicket> {
        let status = self.statuses.entry(key).or_default();
        if status.is_requesting() {
            return None;
        }
        *status = RequestStatus::Requesting;
        Some(SubmitTicket { key, generation: self.generation })
    }

    /// Records the answer for an admitted submission. Returns the new status,
    /// or `None` when the ticket belongs to an invalidated result set.
    pub fn resolve(
        &mut self,
        ticket: SubmitTicket,
        result: ChannelResult<RequestOutcome>,
    ) -> Option<RequestStatus> {
        if ticket.generation != self.generation {
            return None;
        }
        let status = status_from_result(result);
        self.statuses.insert(ticket.key, status.clone());
        Some(status)
    }

    /// Forgets every status; outstanding tickets become stale
    pub fn clear(&mut self) {
        self.statuses.clear();
        self.generation += 1;
    }
}

pub fn status_from_result(result: ChannelResult<RequestOutcome>) -> RequestStatus {
    match result {
        Ok(outcome) if outcome.success => RequestStatus::Requested,
        Ok(outcome) if outcome.is_already_present() => RequestStatus::InLibrary,
        Ok(outcome) => RequestStatus::Error(
            outcome
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_REQUEST_ERROR.to_string()),
        ),
        Err(_) => RequestStatus::Error(CONNECTION_ERROR.to_string()),
    }
}

type ItemPayloadBuilder = fn(&CatalogItem) -> Option<MediaRequest>;

/// Builder for the "request everything" payload of a category
pub fn item_payload_builder(category: Category) -> ItemPayloadBuilder {
    match category {
        Category::Film => film_payload,
        Category::Series => series_payload,
        Category::Artist => artist_payload,
    }
}

pub fn item_payload(item: &CatalogItem) -> Option<MediaRequest> {
    item_payload_builder(item.category())(item)
}

fn film_payload(item: &CatalogItem) -> Option<MediaRequest> {
    match &item.details {
        ItemDetails::Film { title_slug } => Some(MediaRequest::Film {
            id: item.id,
            title: item.title.clone(),
            title_slug: title_slug.clone(),
        }),
        _ => None,
    }
}

fn series_payload(item: &CatalogItem) -> Option<MediaRequest> {
    series_request(item, |_| true)
}

fn artist_payload(item: &CatalogItem) -> Option<MediaRequest> {
    match item.details {
        ItemDetails::Artist {} => Some(MediaRequest::Artist {
            artist_id: item.id,
            title: item.title.clone(),
        }),
        _ => None,
    }
}

/// Payload monitoring exactly one season. Every other known season is sent
/// explicitly unmonitored since the backend applies the list wholesale.
pub fn season_payload(item: &CatalogItem, season_number: u32) -> Option<MediaRequest> {
    item.season(season_number)?;
    series_request(item, |n| n == season_number)
}

pub fn album_payload(artist: &CatalogItem, album: &AlbumSummary) -> Option<MediaRequest> {
    match artist.details {
        ItemDetails::Artist {} => Some(MediaRequest::Album {
            artist_id: artist.id,
            album_id: album.album_id,
        }),
        _ => None,
    }
}

fn series_request(item: &CatalogItem, monitored: impl Fn(u32) -> bool) -> Option<MediaRequest> {
    let ItemDetails::Series { title_slug, seasons } = &item.details else {
        return None;
    };

    Some(MediaRequest::Series {
        id: item.id,
        title: item.title.clone(),
        title_slug: title_slug.clone(),
        seasons: seasons
            .iter()
            .map(|s| SeasonRequest {
                season_number: s.season_number,
                monitored: monitored(s.season_number),
            })
            .collect(),
        library_id: item.library_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChannelError;
    use crate::model::content::SeasonSummary;
    use crate::model::types::{ItemKey, SubItemKey};

    fn series(seasons: &[u32]) -> CatalogItem {
        CatalogItem {
            id: 42,
            title: "The Expanse".to_string(),
            year: Some(2015),
            overview: None,
            poster_url: None,
            in_library: false,
            library_id: Some(9),
            details: ItemDetails::Series {
                title_slug: "the-expanse".to_string(),
                seasons: seasons
                    .iter()
                    .map(|&n| SeasonSummary {
                        season_number: n,
                        monitored: false,
                        total_episode_count: 10,
                        episode_file_count: 0,
                    })
                    .collect(),
            },
        }
    }

    fn key() -> RequestKey {
        ItemKey::new(Category::Film, 1).into()
    }

    #[test]
    fn second_begin_while_requesting_is_rejected() {
        let mut ledger = RequestLedger::new();
        assert!(ledger.begin(key()).is_some());
        assert!(ledger.begin(key()).is_none());
        assert_eq!(ledger.status(&key()), RequestStatus::Requesting);
        assert_eq!(ledger.in_flight(), 1);
    }

    #[test]
    fn outcomes_map_to_terminal_statuses() {
        assert_eq!(status_from_result(Ok(RequestOutcome::accepted())), RequestStatus::Requested);
        assert_eq!(
            status_from_result(Ok(RequestOutcome::already_exists("already in Radarr"))),
            RequestStatus::InLibrary
        );
        assert_eq!(
            status_from_result(Ok(RequestOutcome::rejected("service_unavailable", "Radarr is down"))),
            RequestStatus::Error("Radarr is down".to_string())
        );
        assert_eq!(
            status_from_result(Ok(RequestOutcome::default())),
            RequestStatus::Error(GENERIC_REQUEST_ERROR.to_string())
        );
        assert_eq!(
            status_from_result(Err(ChannelError::Connection("refused".to_string()))),
            RequestStatus::Error(CONNECTION_ERROR.to_string())
        );
    }

    #[test]
    fn terminal_status_can_be_resubmitted() {
        let mut ledger = RequestLedger::new();
        let ticket = ledger.begin(key()).unwrap();
        ledger.resolve(ticket, Err(ChannelError::Timeout));

        let retry = ledger.begin(key()).unwrap();
        assert_eq!(
            ledger.resolve(retry, Ok(RequestOutcome::accepted())),
            Some(RequestStatus::Requested)
        );
    }

    #[test]
    fn clear_makes_outstanding_tickets_stale() {
        let mut ledger = RequestLedger::new();
        let ticket = ledger.begin(key()).unwrap();
        ledger.clear();

        assert_eq!(ledger.resolve(ticket, Ok(RequestOutcome::accepted())), None);
        assert_eq!(ledger.status(&key()), RequestStatus::Idle);
    }

    #[test]
    fn series_request_all_monitors_every_season() {
        let request = item_payload(&series(&[0, 1, 2])).unwrap();
        assert_eq!(request.monitored_seasons(), vec![0, 1, 2]);
        let MediaRequest::Series { library_id, .. } = request else {
            panic!("expected series payload");
        };
        assert_eq!(library_id, Some(9));
    }

    #[test]
    fn season_request_unmonitors_siblings() {
        let request = season_payload(&series(&[1, 2, 3]), 2).unwrap();
        let MediaRequest::Series { seasons, .. } = &request else {
            panic!("expected series payload");
        };
        assert_eq!(
            seasons,
            &vec![
                SeasonRequest { season_number: 1, monitored: false },
                SeasonRequest { season_number: 2, monitored: true },
                SeasonRequest { season_number: 3, monitored: false },
            ]
        );
        assert!(season_payload(&series(&[1]), 5).is_none());
    }

    #[test]
    fn builder_lookup_rejects_mismatched_details() {
        let item = series(&[1]);
        assert!(item_payload_builder(Category::Film)(&item).is_none());
        assert!(item_payload_builder(Category::Artist)(&item).is_none());

        let sub: RequestKey = SubItemKey::Season { series_id: 42, season_number: 1 }.into();
        assert_ne!(sub, RequestKey::from(item.key()));
    }
}
