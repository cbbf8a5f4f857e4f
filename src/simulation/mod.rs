pub mod random_trades;
