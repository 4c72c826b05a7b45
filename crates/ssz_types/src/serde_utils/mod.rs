// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Serde utilities for SSZ types.

pub mod hex_fixed_vec;
pub mod hex_var_list;
pub mod quoted_u64_var_list;
