use core::fmt;
use std::collections::BTreeMap;

use grb::prelude::*;
use itertools::Itertools;
use log::{debug, info};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Period length in years.
const PERIOD: u32 = 10;
const MIN_HARVEST_AGE: u32 = 40;
const OLD_GROWTH_AGE: u32 = 60;
/// Share of each region that must be old growth from `AGE_TRACKING_START` on.
const OLD_GROWTH_SHARE: f64 = 0.2;
const AGE_TRACKING_START: usize = 5;

/// Size and seed of the generated forest.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ForestConfig {
    /// Number of stands
    #[serde(default = "default_num_stands")]
    pub num_stands: usize,
    /// Planning horizon in periods of ten years
    #[serde(default = "default_num_periods")]
    pub num_periods: usize,
    /// Minimum number of periods strictly between two harvests of a stand
    #[serde(default = "default_min_gap")]
    pub min_gap: usize,
    /// Seed of the stand generator
    #[serde(default)]
    pub seed: u64,
}

fn default_num_stands() -> usize {
    100
}

fn default_num_periods() -> usize {
    10
}

fn default_min_gap() -> usize {
    4
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            num_stands: default_num_stands(),
            num_periods: default_num_periods(),
            min_gap: default_min_gap(),
            seed: 0,
        }
    }
}

/// Region of a stand, the second index of `harv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Southern region
    South,
    /// Northern region
    North,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Region::South => "south",
            Region::North => "north",
        })
    }
}

/// Tree species, the first index of `harv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Species {
    /// Softwood, `sw` in names
    Softwood,
    /// Hardwood, `hw` in names
    Hardwood,
}

impl Species {
    fn steepness(&self) -> f64 {
        match self {
            Species::Softwood => 0.05125,
            Species::Hardwood => 0.025,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Species::Softwood => "sw",
            Species::Hardwood => "hw",
        })
    }
}

/// A contiguous one hectare piece of forest with uniform land use.
#[derive(Debug, Clone, PartialEq)]
pub struct Stand {
    /// Stand number, its index in names
    pub id: usize,
    /// Age in years, a multiple of the period length
    pub initial_age: u32,
    /// Fraction of the area stocked with softwood, the rest is hardwood
    pub softwood_share: f64,
    /// Region the stand lies in
    pub region: Region,
}

impl Stand {
    /// Fraction of the stand's area stocked with `species`.
    pub fn share(&self, species: Species) -> f64 {
        match species {
            Species::Softwood => self.softwood_share,
            Species::Hardwood => 1.0 - self.softwood_share,
        }
    }

    /// Volume of `species` harvested from the whole stand at `age`.
    pub fn harvest_volume(&self, species: Species, age: u32) -> f64 {
        self.share(species) * volume(species, age)
    }
}

/// Harvest (`true`) or wait, per period.
pub type Schedule = Vec<bool>;

/// Stands with normally distributed ages, rounded down to whole periods and
/// kept within `0..=90` years.
pub fn create_stands(n: usize, rng: &mut impl Rng) -> Result<Vec<Stand>> {
    let ages: Normal<f64> = Normal::new(40.0, 40.0)?;
    Ok((0..n)
        .map(|id| {
            let age = ages.sample(&mut *rng).round();
            let age = ((age / PERIOD as f64).trunc() * PERIOD as f64).clamp(0.0, 90.0);
            Stand {
                id,
                initial_age: age as u32,
                softwood_share: rng.gen(),
                region: if rng.gen_bool(0.5) {
                    Region::South
                } else {
                    Region::North
                },
            }
        })
        .collect())
}

/// At most two harvests, the second more than `min_gap` periods after the
/// first.
pub fn is_eligible(schedule: &[bool], min_gap: usize) -> bool {
    let harvests = schedule.iter().positions(|&h| h).collect_vec();
    match harvests.as_slice() {
        [] | [_] => true,
        [first, second] => second - first > min_gap,
        _ => false,
    }
}

/// Every eligible schedule of `num_periods` periods, in lexicographic order.
pub fn schedules(num_periods: usize, min_gap: usize) -> Vec<Schedule> {
    itertools::repeat_n([false, true].into_iter(), num_periods)
        .multi_cartesian_product()
        .filter(|schedule| is_eligible(schedule, min_gap))
        .collect()
}

/// Age of a stand at the start of each period under `schedule`.
pub fn ages_under_schedule(initial_age: u32, schedule: &[bool]) -> Vec<u32> {
    schedule
        .iter()
        .scan(initial_age, |age, &harvest| {
            let current = *age;
            *age = if harvest { 0 } else { current + PERIOD };
            Some(current)
        })
        .collect()
}

/// Whether a stand may follow `schedule` without harvesting before it is
/// old enough.
pub fn can_follow(stand: &Stand, schedule: &[bool]) -> bool {
    if stand.initial_age >= MIN_HARVEST_AGE {
        return true;
    }
    let too_young = ((MIN_HARVEST_AGE - stand.initial_age) / PERIOD) as usize;
    !schedule.iter().take(too_young).any(|&h| h)
}

/// Timber volume per hectare at `age`, a logistic curve damped for young
/// stands and capped at 150.
pub fn volume(species: Species, age: u32) -> f64 {
    let age = age as f64;
    let f = 150.0 / (1.0 + (-species.steepness() * age).exp()) * (age / 80.0);
    f.min(150.0)
}

/// The forest harvest planning LP.
///
/// Variables: `x[stand,schedule]` assignment, `age[region,period]` old growth
/// area and `harv[species,region,period]` harvested volume. Constraints:
/// `gub(stand)`, `age(region,period)`, `env(region,period)` and
/// `harv(species,region,period)`. Maximizes total harvested volume.
pub fn build_model(config: &ForestConfig) -> Result<Model> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let stands = create_stands(config.num_stands, &mut rng)?;
    let schedules = schedules(config.num_periods, config.min_gap);
    info!(
        "Building forest model with {} stands and {} schedules",
        stands.len(),
        schedules.len()
    );
    let mut model = Model::new("forest_lp")?;

    let mut assignments = Vec::new();
    for stand in &stands {
        for (s, schedule) in schedules.iter().enumerate() {
            if can_follow(stand, schedule) {
                let x = add_ctsvar!(model, name: format!("x[{},{s}]", stand.id).as_str(), bounds: 0..)?;
                assignments.push((stand, s, x));
            }
        }
    }
    debug!("Added {} assignment variables", assignments.len());

    for (stand, group) in &assignments.iter().group_by(|(stand, _, _)| stand.id) {
        let assigned = group.map(|&(_, _, x)| x).grb_sum();
        model.add_constr(&format!("gub({stand})"), c!(assigned == 1))?;
    }

    let regions = [Region::South, Region::North];
    let area: BTreeMap<Region, usize> = stands.iter().map(|s| s.region).counts().into_iter().collect();
    for period in AGE_TRACKING_START..config.num_periods {
        for region in regions {
            let age = add_ctsvar!(model, name: format!("age[{region},{period}]").as_str(), bounds: 0..)?;
            let old_growth = assignments
                .iter()
                .filter(|(stand, s, _)| {
                    stand.region == region
                        && ages_under_schedule(stand.initial_age, &schedules[*s])[period]
                            >= OLD_GROWTH_AGE
                })
                .map(|&(_, _, x)| x)
                .grb_sum();
            model.add_constr(&format!("age({region},{period})"), c!(age == old_growth))?;
            let required = OLD_GROWTH_SHARE * area.get(&region).copied().unwrap_or(0) as f64;
            model.add_constr(&format!("env({region},{period})"), c!(age >= required))?;
        }
    }

    let mut harvest_vars = Vec::new();
    for period in 0..config.num_periods {
        for region in regions {
            for species in [Species::Softwood, Species::Hardwood] {
                let harv = add_ctsvar!(
                    model,
                    name: format!("harv[{species},{region},{period}]").as_str(),
                    bounds: 0..
                )?;
                let harvested = assignments
                    .iter()
                    .filter(|(stand, s, _)| stand.region == region && schedules[*s][period])
                    .map(|&(stand, s, x)| {
                        let age = ages_under_schedule(stand.initial_age, &schedules[s])[period];
                        x * stand.harvest_volume(species, age)
                    })
                    .grb_sum();
                model.add_constr(
                    &format!("harv({species},{region},{period})"),
                    c!(harv == harvested),
                )?;
                harvest_vars.push(harv);
            }
        }
    }

    model.set_objective(harvest_vars.into_iter().grb_sum(), ModelSense::Maximize)?;
    model.update()?;
    Ok(model)
}
