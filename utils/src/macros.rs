/// Concatenates supplied slices into one continuous vector.
#[macro_export]
macro_rules! concat_slices {
    ($($slice: expr),+) => {
        [$(&$slice[..]),+].concat()
    }
}

/// Adds each supplied group element to a `UProveHash`, propagating serialization errors.
#[macro_export]
macro_rules! hash_elements {
    ($hasher: expr, $($elem: expr),+) => {
        $(
            $hasher.update_element($elem)?;
        )+
    };
}
