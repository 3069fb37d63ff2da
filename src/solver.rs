use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::PlanConfig;
use crate::error::{Error, Result};
use crate::estimator;
use crate::packer;
use crate::segment;
use crate::types::{PackingEstimate, PackingReport, Requirement, Segment};

/// Bisection steps when searching for the largest multiplier.
const MAX_ITERS: usize = 60;
const MULTIPLIER_EPSILON: f64 = 1e-9;
/// The doubling phase gives up past this multiplier.
const MAX_MULTIPLIER: f64 = 1e6;

pub struct Planner {
    config: PlanConfig,
    requirements: Vec<Requirement>,
}

/// Everything computed for one set of requirements.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub config: PlanConfig,
    pub requirements: Vec<Requirement>,
    /// One per requirement, in input order.
    pub estimates: Vec<PackingEstimate>,
    /// Pieces in the order segmentation produced them.
    pub segments: Vec<Segment>,
    pub report: PackingReport,
}

/// Largest household multiplier that still fits the bed budget.
#[derive(Debug, Clone, Serialize)]
pub struct Scaling {
    /// Every count in `plan` is `ceil(original * multiplier)`.
    pub multiplier: f64,
    pub plan: Plan,
}

impl Planner {
    pub fn new(config: PlanConfig, requirements: Vec<Requirement>) -> Self {
        Self {
            config,
            requirements,
        }
    }

    pub fn solve(&self) -> Result<Plan> {
        let plan = self.build()?;
        if let Some(short) = plan.shortfall() {
            warn!(
                needed = plan.report.container_count(),
                available = ?self.config.available_containers,
                short,
                "plan needs more beds than available"
            );
        }
        Ok(plan)
    }

    /// Finds the largest `x` such that every count scaled to `ceil(count * x)`
    /// still packs into `available_containers` beds.
    ///
    /// Doubles `x` from 1 until a plan no longer fits, then bisects. Returns
    /// `None` when not even one plant of every crop fits.
    pub fn max_multiplier(&self) -> Result<Option<Scaling>> {
        self.config.validate()?;
        let Some(budget) = self.config.available_containers else {
            return Err(Error::InvalidConfig(
                "scaling needs available_containers".to_string(),
            ));
        };
        if self.requirements.is_empty() {
            return Ok(None);
        }

        let mut lo = 0.0;
        let mut hi = 1.0;
        while self.plan_at(hi, budget)?.is_some() {
            lo = hi;
            hi *= 2.0;
            if hi > MAX_MULTIPLIER {
                break;
            }
        }

        for _ in 0..MAX_ITERS {
            if hi - lo < MULTIPLIER_EPSILON {
                break;
            }
            let mid = (lo + hi) / 2.0;
            if self.plan_at(mid, budget)?.is_some() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        if lo == 0.0 {
            return Ok(None);
        }
        let Some(plan) = self.plan_at(lo, budget)? else {
            return Ok(None);
        };

        // The counts stay the same up to the smallest ratio they allow.
        let multiplier = plan
            .requirements
            .iter()
            .zip(&self.requirements)
            .map(|(scaled, original)| f64::from(scaled.count) / f64::from(original.count))
            .fold(f64::INFINITY, f64::min);
        info!(
            multiplier,
            beds = plan.report.container_count(),
            budget,
            "found largest multiplier"
        );
        Ok(Some(Scaling { multiplier, plan }))
    }

    /// Plan with every count scaled by `x`, or `None` if it overflows `budget`.
    fn plan_at(&self, x: f64, budget: usize) -> Result<Option<Plan>> {
        let mut scaled = Vec::with_capacity(self.requirements.len());
        for req in &self.requirements {
            let count = (f64::from(req.count) * x).ceil();
            if count > f64::from(u32::MAX) {
                return Ok(None);
            }
            scaled.push(Requirement {
                count: (count as u32).max(1),
                ..req.clone()
            });
        }

        match Planner::new(self.config, scaled).build() {
            Ok(plan) if plan.report.container_count() <= budget => Ok(Some(plan)),
            Ok(_) | Err(Error::TooManyPieces { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn build(&self) -> Result<Plan> {
        self.config.validate()?;

        let estimates = self.estimate_all()?;
        let widths: Vec<f64> = estimates.iter().map(|e| e.width).collect();

        let limit = self
            .config
            .available_containers
            .unwrap_or(segment::MAX_PIECES);
        let segments = segment::segment_with_limit(&widths, self.config.capacity, limit)?;
        debug!(
            widths = widths.len(),
            segments = segments.len(),
            "split strips into bed-sized segments"
        );

        let report = packer::pack(segments.clone(), self.config.capacity)?;
        info!(
            containers = report.container_count(),
            total_waste = report.total_waste,
            waste_percent = report.waste_percent(),
            "packed segments"
        );

        Ok(Plan {
            config: self.config,
            requirements: self.requirements.clone(),
            estimates,
            segments,
            report,
        })
    }

    fn estimate_all(&self) -> Result<Vec<PackingEstimate>> {
        self.requirements
            .iter()
            .map(|req| {
                let est = estimator::estimate_requirement(req, self.config.strip_height)?;
                debug!(
                    crop = %req,
                    strategy = %est.strategy,
                    width = est.width,
                    "estimated strip width"
                );
                Ok(est)
            })
            .collect()
    }
}

impl Plan {
    /// Beds needed beyond `available_containers`, if that budget is exceeded.
    pub fn shortfall(&self) -> Option<usize> {
        let available = self.config.available_containers?;
        let needed = self.report.container_count();
        (needed > available).then(|| needed - available)
    }

    /// Crop name for a segment, numbered `name#k` when its strip was split.
    pub fn segment_label(&self, segment: &Segment) -> String {
        let name = match self.requirements.get(segment.source) {
            Some(req) if !req.name.is_empty() => req.name.clone(),
            _ => format!("item {}", segment.source + 1),
        };
        if segment.is_split() {
            format!("{}#{}", name, segment.piece + 1)
        } else {
            name
        }
    }
}
