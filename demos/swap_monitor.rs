use std::thread;
use std::time::Duration;

use snapkit::cache::TimedCache;
use snapkit::system::SystemSwapSource;

fn main() {
    let cache = TimedCache::with_default_window(SystemSwapSource::new());

    for _ in 0..6 {
        match cache.snapshot() {
            Ok(snap) => println!(
                "swap: {} used / {} total ({} free), age {:?}",
                snap.used,
                snap.total,
                snap.free,
                cache.age().unwrap_or_default(),
            ),
            Err(err) => eprintln!("swap fetch failed: {err}"),
        }
        thread::sleep(Duration::from_secs(2));
    }
}
