// Integration tests for the BufferPool recycling API
// Tests cover: sizing invariant, reuse, reclamation, bounded idleness, concurrency

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;

use recyclebuf::{Buffer, BufferPool, PoolConfig, PoolError};

fn pool_with_sizes(c_out: usize, d_in: usize, d_out: usize) -> BufferPool {
    BufferPool::new(PoolConfig::new(c_out, d_in, d_out).unwrap()).unwrap()
}

/// Stable identity of a buffer's backing storage across release/get cycles.
fn storage_addr(buf: &Buffer) -> usize {
    buf.as_slice().as_ptr() as usize
}

// ============================================================================
// Sizing Invariant
// ============================================================================

#[test]
fn test_buffer_size_is_max_of_recommended_sizes() {
    let pool = pool_with_sizes(100, 300, 200);
    assert_eq!(
        pool.buffer_size(),
        300,
        "Pool size class must be the max of the three recommended sizes"
    );

    let buf = pool.get(1).unwrap();
    assert_eq!(
        buf.capacity(),
        300,
        "Every vended buffer must have exactly the size class capacity"
    );
}

#[test]
fn test_all_successful_gets_return_size_class_capacity() {
    let pool = pool_with_sizes(256, 128, 64);

    for requested in [1, 64, 128, 255, 256] {
        let buf = pool.get(requested).unwrap();
        assert_eq!(
            buf.capacity(),
            256,
            "get({}) must return the full size class, not a sub-slice",
            requested
        );
        pool.release(buf);
    }
}

#[test]
fn test_default_pool_uses_streaming_defaults() {
    let pool = BufferPool::default();
    assert_eq!(pool.buffer_size(), PoolConfig::default().buffer_size());
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn test_get_above_size_class_fails() {
    let pool = pool_with_sizes(256, 128, 64);

    let err = pool.get(257).expect_err("oversized request must fail");
    match err {
        PoolError::UnsupportedSize {
            requested,
            supported,
        } => {
            assert_eq!(requested, 257);
            assert_eq!(supported, 256);
        }
        other => panic!("expected UnsupportedSize, got {:?}", other),
    }

    // The error message names both values
    let msg = pool.get(400).unwrap_err().to_string();
    assert!(msg.contains("400"), "message must state the requested size");
    assert!(msg.contains("256"), "message must state the supported size");
}

#[test]
fn test_get_at_and_below_size_class_succeeds() {
    let pool = pool_with_sizes(256, 128, 64);
    assert!(pool.get(256).is_ok());
    assert!(pool.get(1).is_ok());
}

// ============================================================================
// Reuse and Allocation Counting
// ============================================================================

#[test]
fn test_release_then_get_returns_same_storage_cleared() {
    let pool = pool_with_sizes(64, 32, 32);

    let mut buf = pool.get(64).unwrap();
    buf.write(b"previous contents");
    let addr = storage_addr(&buf);
    pool.release(buf);

    let reused = pool.get(64).unwrap();
    assert_eq!(
        storage_addr(&reused),
        addr,
        "Immediate reacquisition must reuse the released buffer"
    );
    assert!(
        reused.is_empty(),
        "Reused buffer must come back with content reset to empty"
    );
}

#[test]
fn test_lifo_reuse_order() {
    let pool = pool_with_sizes(64, 32, 32);

    let first = pool.get(64).unwrap();
    let second = pool.get(64).unwrap();
    let first_addr = storage_addr(&first);
    let second_addr = storage_addr(&second);

    pool.release(first);
    pool.release(second);

    // Most recently released comes back first
    assert_eq!(storage_addr(&pool.get(64).unwrap()), second_addr);
    assert_eq!(storage_addr(&pool.get(64).unwrap()), first_addr);
}

#[test]
fn test_no_spurious_allocation() {
    let pool = pool_with_sizes(64, 32, 32);
    let n = 5;

    let bufs: Vec<_> = (0..n).map(|_| pool.get(64).unwrap()).collect();
    assert_eq!(pool.allocation_count(), n as u64);

    for buf in bufs {
        pool.release(buf);
    }

    // The next N gets are pure reuse
    let bufs: Vec<_> = (0..n).map(|_| pool.get(64).unwrap()).collect();
    assert_eq!(
        pool.allocation_count(),
        n as u64,
        "Gets against a warm pool must not allocate"
    );

    // The (N+1)th get finds the list empty and allocates fresh
    let _extra = pool.get(64).unwrap();
    assert_eq!(pool.allocation_count(), n as u64 + 1);

    drop(bufs);
}

// ============================================================================
// Release Discipline
// ============================================================================

#[test]
fn test_undersized_release_is_a_noop() {
    let pool = pool_with_sizes(64, 32, 32);

    pool.release(Buffer::with_capacity(63));
    assert_eq!(
        pool.idle_count(),
        0,
        "Undersized buffers must not enter the free list"
    );

    // A subsequent get still allocates fresh
    let _ = pool.get(64).unwrap();
    assert_eq!(pool.allocation_count(), 1);
}

#[test]
fn test_idle_cap_bounds_retained_buffers() {
    let config = PoolConfig::new(64, 32, 32).unwrap().with_max_idle(3);
    let pool = BufferPool::new(config).unwrap();

    for _ in 0..10 {
        pool.release(Buffer::with_capacity(64));
    }
    assert_eq!(
        pool.idle_count(),
        3,
        "Free list must retain at most max_idle buffers"
    );
}

// ============================================================================
// Reclamation Tolerance
// ============================================================================

#[test]
fn test_get_skips_reclaimed_entries() {
    let pool = pool_with_sizes(64, 32, 32);

    let warm = pool.get(64).unwrap();
    let cold = pool.get(64).unwrap();
    let warm_addr = storage_addr(&warm);
    pool.release(cold);
    pool.release(warm);
    assert_eq!(pool.idle_count(), 2);

    // Simulate memory pressure: the cold entry loses its backing buffer
    pool.trim(1);
    assert_eq!(pool.idle_count(), 1);

    // The surviving warm buffer is still reusable
    let reused = pool.get(64).unwrap();
    assert_eq!(storage_addr(&reused), warm_addr);

    // Only the cold husk remains; get skips it and allocates fresh
    let allocations_before = pool.allocation_count();
    let fresh = pool.get(64).unwrap();
    assert_eq!(fresh.capacity(), 64);
    assert_eq!(
        pool.allocation_count(),
        allocations_before + 1,
        "With no live entries left, get must fall through to allocation"
    );
}

#[test]
fn test_trim_everything_empties_pool() {
    let pool = pool_with_sizes(64, 32, 32);

    for _ in 0..4 {
        pool.release(Buffer::with_capacity(64));
    }
    pool.trim(0);
    assert_eq!(pool.idle_count(), 0);

    // Pool remains fully usable afterwards
    let buf = pool.get(64).unwrap();
    pool.release(buf);
    assert_eq!(pool.idle_count(), 1);
}

#[test]
fn test_trim_does_not_affect_buffers_on_loan() {
    let pool = pool_with_sizes(64, 32, 32);

    let mut held = pool.get(64).unwrap();
    held.write(b"session data");
    pool.trim(0);

    assert_eq!(held.filled(), b"session data");
    pool.release(held);
    assert_eq!(pool.idle_count(), 1);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_get_release_no_double_issue() {
    let nthreads = 8;
    let iterations = 200;
    let pool = pool_with_sizes(1024, 512, 512);

    // Storage addresses of buffers currently on loan, across all threads
    let on_loan: Arc<Mutex<HashSet<usize>>> = Arc::new(Mutex::new(HashSet::new()));

    let handles: Vec<_> = (0..nthreads)
        .map(|_| {
            let pool = pool.clone();
            let on_loan = Arc::clone(&on_loan);
            thread::spawn(move || {
                for _ in 0..iterations {
                    let mut buf = pool.get(1024).unwrap();
                    assert_eq!(buf.capacity(), 1024);

                    let addr = storage_addr(&buf);
                    assert!(
                        on_loan.lock().unwrap().insert(addr),
                        "Buffer handed out while already on loan to another thread"
                    );

                    buf.write(b"scratch");
                    assert_eq!(buf.filled(), b"scratch");

                    on_loan.lock().unwrap().remove(&addr);
                    pool.release(buf);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Each allocation happens only when no live entry exists, so the total
    // is bounded by peak concurrency rather than total operation count.
    assert!(
        pool.allocation_count() <= nthreads as u64,
        "Allocations ({}) must stay bounded by peak concurrency ({})",
        pool.allocation_count(),
        nthreads
    );
}

#[test]
fn test_concurrent_trim_while_cycling() {
    let nthreads = 4;
    let iterations = 100;
    let pool = pool_with_sizes(1024, 512, 512);

    let mut handles: Vec<_> = (0..nthreads)
        .map(|_| {
            let pool = pool.clone();
            thread::spawn(move || {
                for _ in 0..iterations {
                    let buf = pool.get(512).unwrap();
                    pool.release(buf);
                }
            })
        })
        .collect();

    // One thread applies memory pressure the whole time
    handles.push({
        let pool = pool.clone();
        thread::spawn(move || {
            for _ in 0..iterations {
                pool.trim(1);
            }
        })
    });

    for handle in handles {
        handle.join().unwrap();
    }

    // Pool still works after the churn
    let buf = pool.get(1024).unwrap();
    assert_eq!(buf.capacity(), 1024);
}
