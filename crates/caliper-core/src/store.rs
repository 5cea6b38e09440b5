/// One recorded real-world distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// 1-based, assigned in creation order.
    pub id: usize,
    /// Distance in micrometres.
    pub value: f64,
}

/// Population statistics over all recorded values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divides by N).
    pub std_dev: f64,
}

/// Append-only list of measurements.
#[derive(Clone, Debug, Default)]
pub struct MeasurementStore {
    measurements: Vec<Measurement>,
}

impl MeasurementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` under the next sequential id.
    pub fn append(&mut self, value: f64) -> Measurement {
        let measurement = Measurement {
            id: self.measurements.len() + 1,
            value,
        };
        self.measurements.push(measurement);
        measurement
    }

    pub fn all(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// `None` when nothing has been recorded yet.
    pub fn statistics(&self) -> Option<Statistics> {
        if self.measurements.is_empty() {
            return None;
        }
        let n = self.measurements.len() as f64;
        let mean = self.measurements.iter().map(|m| m.value).sum::<f64>() / n;
        let variance = self
            .measurements
            .iter()
            .map(|m| (m.value - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Statistics {
            count: self.measurements.len(),
            mean,
            std_dev: variance.sqrt(),
        })
    }
}
