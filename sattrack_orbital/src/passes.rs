/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! prediction of satellite passes over an observer.
//!
//! Elevation is only available by propagation, so we sample it with a fixed coarse step over the
//! window, detect threshold crossings and local maxima in the sampled series, and then refine each of
//! them on its bracketing interval (bisection for crossings, golden-section search for maxima).
//! Passes that are cut off by the window boundaries are reported without their missing events

use std::{fmt, time::Duration};
use chrono::{DateTime,Utc};
use serde::{Deserialize,Serialize};
use tracing::debug;
use sattrack_common::datetime::{add_duration, from_unix_secs, to_unix_secs, hms_utc_string};
use crate::{
    Observer, errors::{SatTrackError,Result,op_failed}, tle::ElementRecord,
    propagation::Propagator, state::StateProvider
};

/// refinement precision of event times in seconds
pub const DEFAULT_TOLERANCE_SECS: f64 = 0.1;

/// smallest coarse sampling step we accept for pass prediction
pub const MIN_COARSE_STEP_SECS: f64 = 1.0;

/// upper bound for the number of coarse samples of a single search
pub const MAX_SAMPLES: usize = 10_000_000;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum PassEventKind {
    Rise,
    Peak,
    Set,
}

impl fmt::Display for PassEventKind {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassEventKind::Rise => f.write_str("Rise"),
            PassEventKind::Peak => f.write_str("Peak"),
            PassEventKind::Set => f.write_str("Set"),
        }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct PassEvent {
    pub date: DateTime<Utc>,
    pub kind: PassEventKind,
    pub elevation_deg: f64,
}

impl fmt::Display for PassEvent {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{} {:<4} {:5.1}°", hms_utc_string( &self.date), self.kind, self.elevation_deg)
    }
}

/// an event in the time domain of the search (fractional unix seconds)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct TimedEvent {
    pub t: f64,
    pub kind: PassEventKind,
    pub value: f64,
}

/// find rise (upward crossing of `threshold`), peak (local maximum at or above `threshold`) and set
/// (downward crossing) events of a scalar function `f` over `[start,end]`, in chronological order.
/// Each pass has at most one peak. Events outside the window are not reported.
/// Non-positive steps or tolerances and windows that need more than [`MAX_SAMPLES`] samples are errors
pub fn find_threshold_events<F> (mut f: F, start: f64, end: f64, step: f64, threshold: f64, tolerance: f64) -> Result<Vec<TimedEvent>>
    where F: FnMut(f64)->Result<f64>
{
    if !(step > 0.0) || !step.is_finite() {
        return Err( op_failed!("invalid sampling step {}", step))
    }
    if !(tolerance > 0.0) || !tolerance.is_finite() {
        return Err( op_failed!("invalid refinement tolerance {}", tolerance))
    }
    if !(end > start) {
        return Ok( Vec::new())
    }

    // coarse samples, with one extra sample on each side so that maxima close to the boundaries are bracketed
    let n_steps = ((end - start) / step).ceil();
    if !(n_steps < MAX_SAMPLES as f64) {
        return Err( op_failed!("sampling step {} too small for window of {}s", step, end - start))
    }
    let n = n_steps as usize;
    let mut xs: Vec<f64> = Vec::with_capacity( n + 3);
    xs.push( start - step);
    for i in 0..=n {
        xs.push( (start + i as f64 * step).min(end));
    }
    xs.push( end + step);

    let mut ys: Vec<f64> = Vec::with_capacity( xs.len());
    for x in &xs {
        ys.push( f(*x)?);
    }

    let mut events: Vec<TimedEvent> = Vec::new();
    let last = xs.len() - 2; // index of `end`

    // crossings between in-window samples
    for i in 1..last {
        let (a, b) = (ys[i] - threshold, ys[i+1] - threshold);
        if a < 0.0 && b >= 0.0 {
            let t = bisect( &mut f, xs[i], xs[i+1], threshold, tolerance)?;
            events.push( TimedEvent { t, kind: PassEventKind::Rise, value: f(t)? });
        } else if a >= 0.0 && b < 0.0 {
            let t = bisect( &mut f, xs[i], xs[i+1], threshold, tolerance)?;
            events.push( TimedEvent { t, kind: PassEventKind::Set, value: f(t)? });
        }
    }

    // local maxima of the sampled series
    for j in 1..xs.len()-1 {
        if ys[j] > ys[j-1] && ys[j] >= ys[j+1] {
            let (t, v) = golden_max( &mut f, xs[j-1], xs[j+1], tolerance)?;
            let (t, v) = if v >= ys[j] { (t, v) } else { (xs[j], ys[j]) };

            if v >= threshold && t >= start && t <= end {
                events.push( TimedEvent { t, kind: PassEventKind::Peak, value: v });

                // the whole pass fell between coarse samples, so there were no sample crossings
                if ys[j-1] < threshold && ys[j] < threshold && ys[j+1] < threshold {
                    let lo = xs[j-1].max(start);
                    if f(lo)? < threshold {
                        let tr = bisect( &mut f, lo, t, threshold, tolerance)?;
                        events.push( TimedEvent { t: tr, kind: PassEventKind::Rise, value: f(tr)? });
                    }
                    let hi = xs[j+1].min(end);
                    if f(hi)? < threshold {
                        let ts = bisect( &mut f, t, hi, threshold, tolerance)?;
                        events.push( TimedEvent { t: ts, kind: PassEventKind::Set, value: f(ts)? });
                    }
                }
            }
        }
    }

    events.sort_by( |a,b| a.t.total_cmp( &b.t));
    Ok( single_peak_per_pass( events))
}

/// if a pass has several local maxima we only keep the highest one
fn single_peak_per_pass (events: Vec<TimedEvent>) -> Vec<TimedEvent> {
    let mut result: Vec<TimedEvent> = Vec::with_capacity( events.len());
    let mut peak_idx: Option<usize> = None;

    for e in events {
        match e.kind {
            PassEventKind::Peak => {
                match peak_idx {
                    Some(i) => if e.value > result[i].value { result[i] = e },
                    None => {
                        peak_idx = Some( result.len());
                        result.push(e);
                    }
                }
            }
            _ => {
                peak_idx = None;
                result.push(e);
            }
        }
    }

    result
}

/// find the threshold crossing of `f` within `[lo,hi]`, assuming the interval brackets exactly one crossing
fn bisect<F> (f: &mut F, mut lo: f64, mut hi: f64, threshold: f64, tolerance: f64) -> Result<f64>
    where F: FnMut(f64)->Result<f64>
{
    let lo_below = f(lo)? < threshold;

    while hi - lo > tolerance {
        let mid = 0.5 * (lo + hi);
        if (f(mid)? < threshold) == lo_below {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Ok( 0.5 * (lo + hi))
}

/// golden-section search for the maximum of `f` within `[a,b]`
fn golden_max<F> (f: &mut F, mut a: f64, mut b: f64, tolerance: f64) -> Result<(f64,f64)>
    where F: FnMut(f64)->Result<f64>
{
    let gr = (5f64.sqrt() - 1.0) / 2.0;

    let mut c = b - gr * (b - a);
    let mut d = a + gr * (b - a);
    let mut fc = f(c)?;
    let mut fd = f(d)?;

    while b - a > tolerance {
        if fc > fd {
            b = d;
            d = c;
            fd = fc;
            c = b - gr * (b - a);
            fc = f(c)?;
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + gr * (b - a);
            fd = f(d)?;
        }
    }

    let t = 0.5 * (a + b);
    Ok( (t, f(t)?) )
}

/// predicts rise/peak/set events of satellites over an observer
pub struct PassPredictor<'a,P> where P: Propagator {
    provider: &'a StateProvider<P>,
    coarse_step: Duration,
    tolerance_secs: f64,
}

impl<'a,P> PassPredictor<'a,P> where P: Propagator {
    pub fn new (provider: &'a StateProvider<P>, coarse_step: Duration) -> Self {
        PassPredictor { provider, coarse_step, tolerance_secs: DEFAULT_TOLERANCE_SECS }
    }

    pub fn with_tolerance (mut self, tolerance_secs: f64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// all events within `[start,end]`. An empty result means there is no pass above `min_elevation_deg`.
    /// Fails if the coarse step is below [`MIN_COARSE_STEP_SECS`]
    pub fn predict (&self, rec: &ElementRecord, observer: &Observer, start: &DateTime<Utc>, end: &DateTime<Utc>, min_elevation_deg: f64) -> Result<Vec<PassEvent>> {
        if self.coarse_step.as_secs_f64() < MIN_COARSE_STEP_SECS {
            return Err( op_failed!("coarse step {:?} below minimum of {}s", self.coarse_step, MIN_COARSE_STEP_SECS))
        }

        let elevation = |t: f64| -> Result<f64> {
            let date = from_unix_secs(t).ok_or_else( || op_failed!("time out of range: {}", t))?;
            self.provider.elevation_at( rec, &date, observer)
        };

        let events = find_threshold_events(
            elevation, to_unix_secs(start), to_unix_secs(end),
            self.coarse_step.as_secs_f64(), min_elevation_deg, self.tolerance_secs
        )?;
        debug!("{} pass events for {} between {} and {}", events.len(), rec.name(), start, end);

        events.into_iter().map( |e| {
            let date = from_unix_secs(e.t).ok_or_else( || op_failed!("time out of range: {}", e.t))?;
            Ok( PassEvent { date, kind: e.kind, elevation_deg: e.value } )
        }).collect()
    }

    /// all events within a window of given duration that begins at `start`
    pub fn predict_window (&self, rec: &ElementRecord, observer: &Observer, start: &DateTime<Utc>, window: Duration, min_elevation_deg: f64) -> Result<Vec<PassEvent>> {
        let end = add_duration( start, window);
        self.predict( rec, observer, start, &end, min_elevation_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds (events: &[TimedEvent]) -> Vec<PassEventKind> {
        events.iter().map( |e| e.kind).collect()
    }

    #[test]
    fn test_single_hump() {
        // peak of 50 at t=500, crosses 10 at 500 -/+ 400*acos(...)
        let f = |t: f64| -> Result<f64> { Ok( 50.0 * (-((t - 500.0) / 300.0).powi(2)).exp()) };
        let events = find_threshold_events( f, 0.0, 1000.0, 60.0, 10.0, 0.01).unwrap();

        assert_eq!( kinds(&events), vec![PassEventKind::Rise, PassEventKind::Peak, PassEventKind::Set]);
        assert!( (events[1].t - 500.0).abs() < 0.05);
        assert!( (events[1].value - 50.0).abs() < 1e-6);
        assert!( (events[0].value - 10.0).abs() < 0.01);
        assert!( (events[2].value - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_pass_between_samples() {
        // narrow pass that is completely missed by the coarse samples
        let f = |t: f64| -> Result<f64> { Ok( 30.0 * (-((t - 530.0) / 8.0).powi(2)).exp()) };
        let events = find_threshold_events( f, 0.0, 1000.0, 60.0, 10.0, 0.01).unwrap();
        assert_eq!( kinds(&events), vec![PassEventKind::Rise, PassEventKind::Peak, PassEventKind::Set]);
    }

    #[test]
    fn test_single_peak_per_pass() {
        // two humps that stay above threshold in between
        let f = |t: f64| -> Result<f64> {
            Ok( 20.0 + 10.0 * (-((t - 300.0) / 60.0).powi(2)).exp() + 15.0 * (-((t - 700.0) / 60.0).powi(2)).exp()
                - 30.0 * (-((t - 1500.0) / 100.0).powi(2)).exp() - 30.0 * (-((t + 500.0) / 100.0).powi(2)).exp())
        };
        let events = find_threshold_events( f, 0.0, 1000.0, 30.0, 10.0, 0.01).unwrap();
        let peaks: Vec<&TimedEvent> = events.iter().filter( |e| e.kind == PassEventKind::Peak).collect();
        assert_eq!( peaks.len(), 1);
        assert!( (peaks[0].t - 700.0).abs() < 1.0);
    }

    #[test]
    fn test_invalid_search_parameters() {
        let f = |t: f64| -> Result<f64> { Ok( 50.0 * (-((t - 500.0) / 300.0).powi(2)).exp()) };

        assert!( find_threshold_events( f, 0.0, 1000.0, 0.0, 10.0, 0.01).is_err());
        assert!( find_threshold_events( f, 0.0, 1000.0, -60.0, 10.0, 0.01).is_err());
        assert!( find_threshold_events( f, 0.0, 1000.0, f64::NAN, 10.0, 0.01).is_err());
        assert!( find_threshold_events( f, 0.0, 1000.0, 1e-9, 10.0, 0.01).is_err());
        assert!( find_threshold_events( f, 0.0, 1000.0, 60.0, 10.0, 0.0).is_err());

        // an empty window is not an error
        assert!( find_threshold_events( f, 1000.0, 1000.0, 60.0, 10.0, 0.01).unwrap().is_empty());
    }
}
