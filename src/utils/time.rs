use lazy_static::lazy_static;
use time::{Duration, OffsetDateTime};

lazy_static! {
    static ref UNIX_TIME_UNIT_OFFSET: i128 = (Duration::MILLISECOND / Duration::NANOSECOND) as i128;
}

#[inline]
pub fn sleep_for_ms(ms: u64) {
    std::thread::sleep(std::time::Duration::from_millis(ms));
}

#[inline]
pub fn curr_time_millis() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / (*UNIX_TIME_UNIT_OFFSET)) as u64
}

#[inline]
pub fn curr_time_nanos() -> i128 {
    OffsetDateTime::now_utc().unix_timestamp_nanos()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn millis_and_nanos() {
        let millis = curr_time_millis();
        let nanos = curr_time_nanos();
        assert!(millis > 0);
        assert!(millis as i128 * *UNIX_TIME_UNIT_OFFSET <= nanos);
    }

    #[test]
    fn sleep() {
        let start = curr_time_millis();
        sleep_for_ms(20);
        assert!(curr_time_millis() - start >= 20);
    }
}
