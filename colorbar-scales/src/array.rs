//! Tick generation for continuous numeric domains using 1, 2, 5 multiples of powers of ten

const E10: f32 = 7.071_068; // sqrt(50)
const E5: f32 = 3.162_277_7; // sqrt(10)
const E2: f32 = 1.414_213_5; // sqrt(2)

fn step_factor(error: f32) -> f32 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Generate approximately `count` nicely rounded ticks between `start` and `stop` (inclusive)
pub fn ticks(start: f32, stop: f32, count: f32) -> Vec<f32> {
    if count <= 0.0 || count.is_nan() || start.is_nan() || stop.is_nan() {
        return vec![];
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };

    if !(i2 >= i1) || !inc.is_finite() {
        return vec![];
    }

    let n = (i2 - i1 + 1.0) as usize;
    let value_at = |i: f32| if inc < 0.0 { i / -inc } else { i * inc };

    if reverse {
        (0..n).map(|i| value_at(i2 - i as f32)).collect()
    } else {
        (0..n).map(|i| value_at(i1 + i as f32)).collect()
    }
}

/// Returns (first index, last index, increment). A negative increment
/// stands for the reciprocal step, which keeps fractional ticks exact.
fn tick_spec(start: f32, stop: f32, count: f32) -> (f32, f32, f32) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10.0_f32.powf(power);
    let factor = step_factor(error);

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let recip = 10.0_f32.powf(-power) / factor;
        i1 = (start * recip).round();
        i2 = (stop * recip).round();
        if i1 / recip < start {
            i1 += 1.0;
        }
        if i2 / recip > stop {
            i2 -= 1.0;
        }
        inc = -recip;
    } else {
        inc = 10.0_f32.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }

    (i1, i2, inc)
}

/// Signed tick increment, negative values are reciprocals (see `tick_spec`)
pub fn tick_increment(start: f32, stop: f32, count: f32) -> f32 {
    if !(count > 0.0) {
        return f32::NAN;
    }
    if start == stop {
        return f32::NEG_INFINITY;
    }

    let step = (stop - start) / count;
    if step == 0.0 {
        return f32::NAN;
    }

    let power = step.log10().floor();
    let error = step / 10.0_f32.powf(power);
    let factor = step_factor(error);
    if power >= 0.0 {
        10.0_f32.powf(power) * factor
    } else {
        -10.0_f32.powf(-power) / factor
    }
}

/// Absolute distance between adjacent ticks
pub fn tick_step(start: f32, stop: f32, count: f32) -> f32 {
    let inc = tick_increment(start.min(stop), start.max(stop), count);
    if inc < 0.0 {
        -1.0 / inc
    } else {
        inc
    }
}
