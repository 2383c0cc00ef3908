pub mod pool_state;
