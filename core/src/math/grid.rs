use ndarray::Array1;

pub struct GridHelper;

impl GridHelper {
    /// Evenly spaced samples over `[start, end]`, both endpoints included.
    pub fn linspace(start: f64, end: f64, count: usize) -> Array1<f64> {
        Array1::linspace(start, end, count)
    }
}
