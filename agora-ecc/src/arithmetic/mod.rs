mod modular;

pub use modular::{invmod, is_probable_prime, reduce, sqrtmod};
