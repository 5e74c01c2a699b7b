//! Serial and parallel drivers.

use super::source::{DiffSource, discover_sources};
use crate::calls::DialectRegistry;
use crate::config::{Config, FilesPolicy, Strategy};
use crate::diff::analyze_diff;
use crate::error::{DiffStatsError, Result};
use crate::stats::DiffStats;
use rayon::prelude::*;
use std::path::Path;

/// Runs one parser per source and merges their partial results.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'r> {
    registry: &'r DialectRegistry,
    policy: FilesPolicy,
    strategy: Strategy,
    jobs: Option<usize>,
}

impl<'r> Engine<'r> {
    pub fn new(registry: &'r DialectRegistry, config: &Config) -> Self {
        Self {
            registry,
            policy: config.files_policy,
            strategy: config.strategy,
            jobs: config.pinned_jobs(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Pin the `per_cpu` pool size; `None` uses one worker per processor.
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs.filter(|&n| n > 0);
        self
    }

    /// Analyze every source and return the merged result.
    pub fn run<S: DiffSource>(&self, sources: &[S]) -> Result<DiffStats> {
        log::debug!(
            "analyzing {} source(s) with {:?} strategy",
            sources.len(),
            self.strategy
        );

        match self.strategy {
            Strategy::Serial => self.run_serial(sources),
            Strategy::PerFile => self.run_per_file(sources),
            Strategy::PerCpu => self.run_per_cpu(sources),
        }
    }

    /// Analyze a single source into its partial result.
    pub fn analyze_source<S: DiffSource + ?Sized>(&self, source: &S) -> Result<DiffStats> {
        let text = source.read()?;
        let stats = analyze_diff(source.name(), &text, self.registry, self.policy);

        log::debug!(
            "{}: {} file(s), {} region(s), +{} -{}",
            source.name(),
            stats.files.len(),
            stats.regions,
            stats.lines_added,
            stats.lines_deleted
        );
        Ok(stats)
    }

    fn run_serial<S: DiffSource>(&self, sources: &[S]) -> Result<DiffStats> {
        sources
            .iter()
            .try_fold(DiffStats::new(), |total, source| {
                Ok(total.merged(self.analyze_source(source)?))
            })
    }

    /// One scoped thread per source; results are joined in input order.
    fn run_per_file<S: DiffSource>(&self, sources: &[S]) -> Result<DiffStats> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = sources
                .iter()
                .map(|source| (source.name(), scope.spawn(move || self.analyze_source(source))))
                .collect();

            let mut total = DiffStats::new();
            let mut first_error = None;

            for (name, handle) in handles {
                let outcome = handle.join().unwrap_or_else(|_| {
                    Err(DiffStatsError::WorkerFailed(format!(
                        "worker for '{}' panicked",
                        name
                    )))
                });

                match outcome {
                    Ok(partial) => total.merge(partial),
                    Err(err) => {
                        first_error.get_or_insert(err);
                    }
                }
            }

            match first_error {
                Some(err) => Err(err),
                None => Ok(total),
            }
        })
    }

    /// Work-stealing pool bounded by the processor count or `jobs`.
    fn run_per_cpu<S: DiffSource>(&self, sources: &[S]) -> Result<DiffStats> {
        let reduce = || {
            sources
                .par_iter()
                .map(|source| self.analyze_source(source))
                .try_reduce(DiffStats::new, |a, b| Ok(a.merged(b)))
        };

        match self.jobs {
            Some(jobs) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .map_err(|e| {
                        DiffStatsError::WorkerFailed(format!("failed to start worker pool: {}", e))
                    })?;
                pool.install(reduce)
            }
            None => reduce(),
        }
    }
}

/// Discover the sources in `dir` and analyze them as configured.
pub fn compute(dir: &Path, config: &Config) -> Result<DiffStats> {
    let registry = DialectRegistry::from_config(config);
    let sources = discover_sources(dir, config)?;
    Engine::new(&registry, config).run(&sources)
}
