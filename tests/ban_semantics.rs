//! Service-level semantics of the ban cache.
//!
//! Covers the observable contract end to end: ban visibility, expiry
//! boundaries, idempotent re-bans, unban reporting, and concurrent access on
//! disjoint addresses.

use std::net::IpAddr;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bancached::cache::BanCache;
use bancached::error::BanError;

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

#[test]
fn ban_then_is_banned_immediately() {
    let cache = BanCache::new();
    for addr in ["203.0.113.5", "10.1.2.3", "2001:db8::42"] {
        cache.ban(addr, Duration::from_secs(30), None).unwrap();
        assert!(cache.is_banned(&ip(addr)), "{addr} should be banned");
    }
}

#[test]
fn expiry_boundary_one_second_ban() {
    let cache = BanCache::new();
    cache.ban("203.0.113.5", Duration::from_secs(1), None).unwrap();
    assert!(cache.is_banned(&ip("203.0.113.5")));

    thread::sleep(Duration::from_millis(1250));
    assert!(!cache.is_banned(&ip("203.0.113.5")));
}

#[test]
fn idempotent_reban_keeps_one_entry_with_new_ttl() {
    let cache = BanCache::new();
    cache.ban("203.0.113.5", Duration::from_secs(10), None).unwrap();
    cache.ban("203.0.113.5", Duration::from_secs(100), None).unwrap();

    let bans = cache.list_bans();
    assert_eq!(bans.len(), 1);
    assert!(
        bans[0].remaining_secs > 90 && bans[0].remaining_secs <= 100,
        "remaining {}s should be close to 100",
        bans[0].remaining_secs
    );
}

#[test]
fn unban_of_active_ban_reports_lifted() {
    let cache = BanCache::new();
    cache.ban("198.51.100.7", Duration::from_secs(50), None).unwrap();
    assert!(cache.unban("198.51.100.7").unwrap());
    assert!(!cache.is_banned(&ip("198.51.100.7")));
}

#[test]
fn unban_of_absent_ban_reports_nothing_lifted() {
    let cache = BanCache::new();
    assert!(!cache.unban("198.51.100.8").unwrap());

    // Already-expired bans count as absent too.
    cache
        .ban("198.51.100.8", Duration::from_millis(30), None)
        .unwrap();
    thread::sleep(Duration::from_millis(80));
    assert!(!cache.unban("198.51.100.8").unwrap());
}

#[test]
fn invalid_inputs_rejected_without_mutation() {
    let cache = BanCache::new();

    assert!(matches!(
        cache.ban("not-an-ip", Duration::from_secs(10), None),
        Err(BanError::InvalidAddress(_))
    ));
    assert!(matches!(
        cache.ban("203.0.113.5", Duration::ZERO, None),
        Err(BanError::InvalidDuration)
    ));

    assert!(cache.list_bans().is_empty());
    assert!(cache.is_empty());
}

#[test]
fn listing_excludes_expired_entries() {
    let cache = BanCache::new();
    cache
        .ban("203.0.113.1", Duration::from_millis(100), None)
        .unwrap();
    cache.ban("203.0.113.2", Duration::from_secs(100), None).unwrap();

    thread::sleep(Duration::from_millis(250));

    let bans = cache.list_bans();
    assert_eq!(bans.len(), 1);
    assert_eq!(bans[0].address, ip("203.0.113.2"));
}

#[test]
fn concurrent_operations_on_disjoint_addresses() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 50;

    let cache = Arc::new(BanCache::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let addrs: Vec<String> =
                    (0..PER_THREAD).map(|i| format!("10.{t}.{i}.1")).collect();

                for addr in &addrs {
                    cache.ban(addr, Duration::from_secs(120), None).unwrap();
                    assert!(cache.is_banned(&addr.parse().unwrap()));
                }

                // Lift every second ban; each must report an active lift.
                for addr in addrs.iter().step_by(2) {
                    assert!(cache.unban(addr).unwrap());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Serial-equivalent end state: exactly the odd-indexed addresses remain.
    let bans = cache.list_bans();
    assert_eq!(bans.len(), THREADS * PER_THREAD / 2);
    for t in 0..THREADS {
        for i in 0..PER_THREAD {
            let banned = cache.is_banned(&ip(&format!("10.{t}.{i}.1")));
            assert_eq!(banned, i % 2 == 1, "thread {t} addr {i}");
        }
    }
}

#[test]
fn snapshot_stays_consistent_under_writers() {
    let cache = Arc::new(BanCache::new());
    for i in 0..100u32 {
        cache
            .ban(&format!("172.16.{}.{}", i / 256, i % 256), Duration::from_secs(60), None)
            .unwrap();
    }

    let writer = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for i in 0..100u32 {
                cache
                    .ban(&format!("172.17.0.{}", i % 256), Duration::from_secs(60), None)
                    .unwrap();
            }
        })
    };

    // Every listing taken while the writer runs must contain the full initial
    // population; a torn enumeration would drop some of it.
    for _ in 0..20 {
        let bans = cache.list_bans();
        let initial = bans
            .iter()
            .filter(|b| matches!(b.address, IpAddr::V4(v4) if v4.octets()[1] == 16))
            .count();
        assert_eq!(initial, 100);
    }

    writer.join().unwrap();
}
