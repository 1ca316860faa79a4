// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Criterion with a flamegraph profiler attached (`--profile-time <secs>` to record).
///
/// Validation runs are short, so the defaults favour more samples over long windows.
pub fn criterion() -> Criterion {
    let frequency = env_or("SLOTROUTE_PROFILE_FREQ", 200_i32).clamp(1, 1000);
    let sample_size = env_or("SLOTROUTE_BENCH_SAMPLES", 100_usize).clamp(10, 500);
    let warmup_secs = env_or("SLOTROUTE_BENCH_WARMUP_SECS", 2_u64).clamp(1, 60);
    let measurement_secs = env_or("SLOTROUTE_BENCH_SECS", 4_u64).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
