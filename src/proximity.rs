use rayon::prelude::*;

use crate::{
    models::Stop,
    shared::geo::{Coordinate, Distance},
};

/// Anything that may have a position on the map.
pub trait Locatable {
    fn coordinate(&self) -> Option<Coordinate>;
}

impl Locatable for Stop {
    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

impl Locatable for Coordinate {
    fn coordinate(&self) -> Option<Coordinate> {
        Some(*self)
    }
}

/// Where entries without a coordinate end up when ranking.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MissingCoordinate {
    /// Treated as zero distance, which puts them in front.
    #[default]
    First,
    /// Put behind every located entry.
    Last,
}

impl MissingCoordinate {
    fn fallback(&self) -> Distance {
        match self {
            Self::First => Distance::ZERO,
            Self::Last => Distance::from_meters(f64::INFINITY),
        }
    }
}

/// Orders `items` by distance from `from`, nearest first.
/// Entries at the same distance keep their relative order.
pub fn rank<T>(items: Vec<T>, from: &Coordinate) -> Vec<T>
where
    T: Locatable + Send,
{
    rank_with(items, from, MissingCoordinate::default())
}

pub fn rank_with<T>(items: Vec<T>, from: &Coordinate, missing: MissingCoordinate) -> Vec<T>
where
    T: Locatable + Send,
{
    let fallback = missing.fallback();
    let mut ranked: Vec<(Distance, T)> = items
        .into_par_iter()
        .map(|item| {
            let distance = item
                .coordinate()
                .map(|coordinate| coordinate.distance(from))
                .unwrap_or(fallback);
            (distance, item)
        })
        .collect();
    ranked.par_sort_by(|(a, _), (b, _)| a.cmp_total(b));
    ranked.into_iter().map(|(_, item)| item).collect()
}

/// Ranks and pairs each entry with its distance, None when it has no location.
pub fn rank_with_distance<T>(items: Vec<T>, from: &Coordinate) -> Vec<(T, Option<Distance>)>
where
    T: Locatable + Send,
{
    rank(items, from)
        .into_iter()
        .map(|item| {
            let distance = item.coordinate().map(|coordinate| coordinate.distance(from));
            (item, distance)
        })
        .collect()
}
