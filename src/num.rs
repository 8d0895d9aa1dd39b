use ordered_float::NotNan;

/// A holder for a single criterion value. Raw scores may use any numeric representation; every
/// derived quantity is computed in `f64`.
pub trait Value: Copy + std::fmt::Debug {
    fn get(&self) -> f64;
    fn set(&mut self, value: f64);
}

macro_rules! impl_value {
    ($($t:ty),*) => {
        $(
            impl Value for $t {
                fn get(&self) -> f64 {
                    *self as f64
                }
                fn set(&mut self, value: f64) {
                    *self = value as $t;
                }
            }
        )*
    };
}

impl_value!(f64, f32, i32, i64, u32, u64);

/// A non-NaN f64 value in the range [0, 1].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Normalized(NotNan<f64>);

impl Normalized {
    pub const ZERO: Self = Self(unsafe { NotNan::new_unchecked(0.0) });
    pub const ONE: Self = Self(unsafe { NotNan::new_unchecked(1.0) });

    pub fn new(value: f64) -> Option<Self> {
        let value = NotNan::new(value).ok()?;
        if value.is_sign_negative() || *value > 1.0 {
            return None;
        }
        Some(Self(value))
    }

    pub fn as_f64(&self) -> f64 {
        self.0.into_inner()
    }
}

impl std::cmp::PartialOrd for Normalized {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for Normalized {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl std::fmt::Debug for Normalized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
