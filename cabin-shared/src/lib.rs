pub mod models;

pub use models::{Cabin, Flight, FlightId, Seat, SeatId, SeatStatus, Voucher, VoucherId, VoucherStatus};
