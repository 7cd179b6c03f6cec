pub mod sift;

#[derive(Debug,Clone)]
pub struct Pyramid<T> {
    pub octaves: Vec<T>
}

impl<T> Pyramid<T> {
    pub fn empty(number_of_octaves: usize) -> Pyramid<T> {
        Pyramid {octaves: Vec::<T>::with_capacity(number_of_octaves)}
    }

    pub fn octave_count(&self) -> usize {
        self.octaves.len()
    }
}
