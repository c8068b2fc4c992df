use ahash::RandomState;

pub type HashMap<K, V> = std::collections::HashMap<K, V, RandomState>;

pub mod travelling_salesman;
