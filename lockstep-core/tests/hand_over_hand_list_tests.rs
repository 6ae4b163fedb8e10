#[cfg(test)]
mod hand_over_hand_list_tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    use lockstep_core::{CoarseLockedList, ConcurrentSortedCollection, HandOverHandList, ListConfig};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use serial_test::serial;
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn create_test_list() -> Arc<HandOverHandList> {
        init_tracing();
        Arc::new(HandOverHandList::new())
    }

    #[test]
    fn test_random_operations_match_coarse_model() {
        init_tracing();
        let list = HandOverHandList::new();
        let model = CoarseLockedList::new();
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..5000 {
            let value = rng.random_range(-50..50);
            if rng.random_bool(0.6) {
                list.insert(value).unwrap();
                model.insert(value).unwrap();
            } else {
                assert_eq!(list.remove(value), model.remove(value));
            }
        }

        assert_eq!(list.to_vec(), model.to_vec());
        assert_eq!(list.len(), model.len());
        assert_eq!(
            list.count_matching(|v| v < 0),
            model.count_matching(|v| v < 0)
        );
    }

    #[test]
    #[serial]
    fn test_concurrent_distinct_inserts_are_all_present() {
        let list = create_test_list();
        let num_threads = 16;
        let values_per_thread = 500;
        let barrier = Arc::new(Barrier::new(num_threads));

        let handles: Vec<_> = (0..num_threads)
            .map(|t| {
                let list = Arc::clone(&list);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    // Half the threads walk upwards, half downwards
                    for i in 0..values_per_thread {
                        let i = if t % 2 == 0 { i } else { values_per_thread - 1 - i };
                        list.insert((i * num_threads + t) as i32).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let values = list.to_vec();
        let expected: Vec<i32> = (0..(num_threads * values_per_thread) as i32).collect();
        assert_eq!(values, expected);
    }

    #[test]
    #[serial]
    fn test_concurrent_removers_each_take_one_duplicate() {
        let list = create_test_list();
        let copies = 64;
        for _ in 0..copies {
            list.insert(7).unwrap();
        }
        list.insert(1).unwrap();
        list.insert(9).unwrap();

        let handles: Vec<_> = (0..copies)
            .map(|_| {
                let list = Arc::clone(&list);
                thread::spawn(move || list.remove(7))
            })
            .collect();

        let removed = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|&removed| removed)
            .count();

        assert_eq!(removed, copies);
        assert_eq!(list.to_vec(), vec![1, 9]);
    }

    #[test]
    #[serial]
    fn test_print_all_terminates_under_concurrency() {
        let list = create_test_list();
        let stop_flag = Arc::new(AtomicBool::new(false));

        for i in 0..200 {
            list.insert(i).unwrap();
        }

        let writer = {
            let list = Arc::clone(&list);
            let stop = Arc::clone(&stop_flag);
            thread::spawn(move || {
                let mut i = 0;
                while !stop.load(Ordering::Relaxed) {
                    list.remove(i % 200);
                    list.insert(i % 200).unwrap();
                    i += 1;
                }
            })
        };

        for _ in 0..20 {
            list.print_all().unwrap();
        }
        thread::sleep(Duration::from_millis(50));

        stop_flag.store(true, Ordering::Relaxed);
        writer.join().unwrap();

        assert_eq!(list.to_vec(), (0..200).collect::<Vec<_>>());
    }

    #[test]
    #[serial]
    fn test_budget_holds_under_concurrent_inserts() {
        init_tracing();
        let limit = 100;
        let list = Arc::new(
            HandOverHandList::with_config(ListConfig::default().with_max_nodes(limit)).unwrap(),
        );

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let list = Arc::clone(&list);
                thread::spawn(move || {
                    (0..50)
                        .filter(|i| list.insert(t * 50 + i).is_ok())
                        .count()
                })
            })
            .collect();

        let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(accepted, limit);
        assert_eq!(list.len(), limit);
        assert_eq!(list.to_vec().len(), limit);
    }

    #[test]
    fn test_destroy_reclaims_everything() {
        init_tracing();
        let list = HandOverHandList::new();
        for i in (0..1000).rev() {
            list.insert(i).unwrap();
        }
        for i in 0..10 {
            assert!(list.remove(i));
        }

        // The list is moved into destroy; further use does not compile.
        assert_eq!(list.destroy(), 990);
    }
}
