pub mod taylor_num_traits;
pub mod taylor_std_ops;
