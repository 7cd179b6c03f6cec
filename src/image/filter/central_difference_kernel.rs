extern crate nalgebra as na;

use na::DMatrix;
use crate::Float;
use super::kernel::Kernel;

/// First derivative by central difference: (f(x+1) - f(x-1)) / 2.
pub struct CentralDifferenceKernel {
    kernel: DMatrix<Float>
}

impl CentralDifferenceKernel {
    pub fn new() -> CentralDifferenceKernel {
        CentralDifferenceKernel {
            kernel: DMatrix::from_vec(1,3,vec![-1.0,0.0,1.0])
        }
    }
}

impl Default for CentralDifferenceKernel {
    fn default() -> Self {
        CentralDifferenceKernel::new()
    }
}

impl Kernel for CentralDifferenceKernel {
    fn kernel(&self) -> &DMatrix<Float> {
        &self.kernel
    }

    fn step(&self) -> usize {
        1
    }

    fn normalizing_constant(&self) -> Float{
        2.0
    }
}
