//! Pipeline tests.
//!
//! Every test here runs a hand-encoded program through the full simulator and checks
//! architectural results together with the counters that reveal the timing.
