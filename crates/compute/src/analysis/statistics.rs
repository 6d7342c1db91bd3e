use foundation::{GeoPoint, MeanCenter};

pub struct Statistics;

impl Statistics {
    pub fn mean(values: &[f64]) -> Option<f64> {
        Self::mean_of(values.iter().copied())
    }

    /// Plain left-to-right summation; `None` when the input is empty.
    pub fn mean_of(values: impl IntoIterator<Item = f64>) -> Option<f64> {
        let (sum, count) = values
            .into_iter()
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Unweighted mean coordinate, one axis at a time.
    pub fn mean_center(points: &[GeoPoint]) -> Option<MeanCenter> {
        let mean_latitude = Self::mean_of(points.iter().map(|p| p.latitude))?;
        let mean_longitude = Self::mean_of(points.iter().map(|p| p.longitude))?;
        Some(MeanCenter::new(mean_latitude, mean_longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::Statistics;
    use foundation::{GeoPoint, MeanCenter};

    #[test]
    fn mean_works() {
        let m = Statistics::mean(&[1.0, 2.0, 3.0]).unwrap();
        assert!((m - 2.0).abs() < 1e-9);
        assert_eq!(Statistics::mean(&[]), None);
    }

    #[test]
    fn mean_of_accepts_any_iterator() {
        let m = Statistics::mean_of([6.4, 6.5].into_iter()).unwrap();
        assert!((m - 6.45).abs() < 1e-12);
        assert_eq!(Statistics::mean_of(std::iter::empty()), None);
    }

    #[test]
    fn mean_center_of_singleton_is_exact() {
        let p = GeoPoint::new(6.41234567, 81.49876543);
        assert_eq!(
            Statistics::mean_center(&[p]),
            Some(MeanCenter::new(p.latitude, p.longitude))
        );
    }

    #[test]
    fn mean_center_averages_each_axis() {
        let c = Statistics::mean_center(&[GeoPoint::new(1.0, 10.0), GeoPoint::new(3.0, 30.0)])
            .unwrap();
        assert!((c.mean_latitude - 2.0).abs() < 1e-12);
        assert!((c.mean_longitude - 20.0).abs() < 1e-12);
        assert_eq!(Statistics::mean_center(&[]), None);
    }
}
