//! Library size counters read from the host's sensor snapshot

use std::collections::HashMap;

use super::types::Category;

const UNAVAILABLE: &str = "unavailable";

fn sensor_id(category: Category) -> &'static str {
    match category {
        Category::Film => "sensor.requestarr_radarr_movies",
        Category::Series => "sensor.requestarr_sonarr_series",
        Category::Artist => "sensor.requestarr_lidarr_artists",
    }
}

/// Number of items each backend already holds, when the sensor reports one
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LibraryStats {
    pub films: Option<u64>,
    pub series: Option<u64>,
    pub artists: Option<u64>,
}

impl LibraryStats {
    pub fn from_sensors(states: &HashMap<String, String>) -> Self {
        let read = |category| {
            states
                .get(sensor_id(category))
                .map(|s| s.trim())
                .filter(|s| *s != UNAVAILABLE)
                .and_then(|s| s.parse().ok())
        };

        Self {
            films: read(Category::Film),
            series: read(Category::Series),
            artists: read(Category::Artist),
        }
    }

    pub fn get(&self, category: Category) -> Option<u64> {
        match category {
            Category::Film => self.films,
            Category::Series => self.series,
            Category::Artist => self.artists,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_and_garbage_sensors_are_absent() {
        let states = HashMap::from([
            ("sensor.requestarr_radarr_movies".to_string(), "412".to_string()),
            ("sensor.requestarr_sonarr_series".to_string(), "unavailable".to_string()),
            ("sensor.requestarr_lidarr_artists".to_string(), "n/a".to_string()),
        ]);

        let stats = LibraryStats::from_sensors(&states);
        assert_eq!(stats.get(Category::Film), Some(412));
        assert_eq!(stats.series, None);
        assert_eq!(stats.artists, None);
    }
}
