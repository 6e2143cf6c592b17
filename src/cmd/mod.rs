pub mod distribute;
pub mod init;
pub mod recalc;
pub mod show;
pub mod variance;
pub mod weeks;
