//! Analysis stage: rank every stored city and rewrite the store.

use std::path::Path;

use tracing::info;

use crate::{
    error::Result,
    forecast::{CityStat, RankedResult},
    store::{read_store, write_store},
};

/// Assigns `rating = 1 + position` after a stable descending sort on
/// `(avg_temperature, avg_hours_without_precipitation)`.
///
/// Records keep their input order; equal keys rank in input order. Any prior
/// rating is overwritten and does not influence the result.
pub fn rank(mut cities: Vec<CityStat>) -> RankedResult {
    let mut order: Vec<usize> = (0..cities.len()).collect();
    order.sort_by(|&a, &b| cities[a].cmp_rank(&cities[b]));

    for (position, index) in order.into_iter().enumerate() {
        cities[index].rating = Some(position as u32 + 1);
    }

    RankedResult::new(cities)
}

/// Reads the store, ranks it and writes the ranked records back in place.
pub fn analyze(store_path: &Path) -> Result<RankedResult> {
    let cities = read_store(store_path)?;
    info!("Ranking {} cities", cities.len());

    let ranked = rank(cities);
    write_store(store_path, ranked.cities())?;

    if let Some(best) = ranked.by_rank().first() {
        info!(
            "Best city is {} (avg temperature {:.3}, avg dry hours {:.3})",
            best.city, best.avg_temperature, best.avg_hours_without_precipitation
        );
    }

    Ok(ranked)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stat(city: &str, avg_temperature: f64, avg_hours: f64) -> CityStat {
        CityStat {
            city: city.to_string(),
            days: vec![],
            avg_temperature,
            avg_hours_without_precipitation: avg_hours,
            rating: None,
        }
    }

    fn ratings(ranked: &RankedResult) -> Vec<(String, u32)> {
        ranked
            .cities()
            .iter()
            .map(|c| (c.city.clone(), c.rating.unwrap()))
            .collect()
    }

    #[test]
    fn should_break_ties_by_store_order() {
        let ranked = rank(vec![
            stat("A", 10.0, 5.0),
            stat("C", 15.0, 2.0),
            stat("B", 15.0, 2.0),
        ]);

        assert_eq!(ranked.rating_of("C"), Some(1));
        assert_eq!(ranked.rating_of("B"), Some(2));
        assert_eq!(ranked.rating_of("A"), Some(3));
    }

    #[test]
    fn should_keep_store_order_for_signed_zero_tie() {
        let ranked = rank(vec![stat("NEG", -0.0, 4.0), stat("POS", 0.0, 4.0)]);

        assert_eq!(ranked.rating_of("NEG"), Some(1));
        assert_eq!(ranked.rating_of("POS"), Some(2));
    }

    #[test]
    fn should_use_dry_hours_as_second_key() {
        let ranked = rank(vec![stat("WET", 20.0, 1.0), stat("DRY", 20.0, 8.0)]);

        assert_eq!(ranked.rating_of("DRY"), Some(1));
        assert_eq!(ranked.rating_of("WET"), Some(2));
    }

    #[test]
    fn should_assign_contiguous_ratings() {
        let cities: Vec<_> = (0..20)
            .map(|i| stat(&format!("CITY{}", i), (i % 7) as f64, (i % 3) as f64))
            .collect();

        let ranked = rank(cities);

        let mut ratings: Vec<u32> = ranked.cities().iter().map(|c| c.rating.unwrap()).collect();
        ratings.sort();
        assert_eq!(ratings, (1..=20).collect::<Vec<u32>>());
    }

    #[test]
    fn should_keep_input_order_of_records() {
        let ranked = rank(vec![stat("A", 1.0, 0.0), stat("B", 2.0, 0.0)]);

        let names: Vec<_> = ranked.cities().iter().map(|c| c.city.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        let by_rank: Vec<_> = ranked.by_rank().into_iter().map(|c| c.city.as_str()).collect();
        assert_eq!(by_rank, vec!["B", "A"]);
    }

    #[test]
    fn should_ignore_previous_rating() {
        let mut stale = stat("A", 1.0, 0.0);
        stale.rating = Some(1);
        let mut fresh = stat("B", 2.0, 0.0);
        fresh.rating = Some(2);

        let ranked = rank(vec![stale, fresh]);

        assert_eq!(ratings(&ranked), vec![("A".to_string(), 2), ("B".to_string(), 1)]);
    }

    #[test]
    fn should_rank_empty_set() {
        assert!(rank(vec![]).is_empty());
    }

    #[test]
    fn should_rewrite_store_with_ratings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        write_store(
            &path,
            &[stat("A", 10.0, 5.0), stat("C", 15.0, 2.0), stat("B", 15.0, 2.0)],
        )
        .unwrap();

        analyze(&path).unwrap();

        let stored = read_store(&path).unwrap();
        let stored: Vec<_> = stored.iter().map(|c| (c.city.as_str(), c.rating)).collect();
        assert_eq!(stored, vec![("A", Some(3)), ("C", Some(1)), ("B", Some(2))]);
    }

    #[test]
    fn should_be_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        write_store(
            &path,
            &[stat("X", 3.0, 3.0), stat("Y", 3.0, 3.0), stat("Z", 9.0, 0.0)],
        )
        .unwrap();

        let first = analyze(&path).unwrap();
        let second = analyze(&path).unwrap();

        assert_eq!(ratings(&first), ratings(&second));
        assert_eq!(read_store(&path).unwrap(), second.cities());
    }

    #[test]
    fn should_analyze_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        write_store(&path, &[]).unwrap();

        let ranked = analyze(&path).unwrap();

        assert!(ranked.is_empty());
        assert!(read_store(&path).unwrap().is_empty());
    }

    #[test]
    fn should_fail_without_store() {
        let dir = TempDir::new().unwrap();

        assert!(analyze(&dir.path().join("missing.json")).is_err());
    }
}
