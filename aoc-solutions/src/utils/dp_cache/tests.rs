use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use super::*;

struct Fibonacci;

impl DpProblem<usize, u64> for Fibonacci {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
    }
}

fn fib_iterative(n: usize) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    a
}

#[test]
fn test_fibonacci_vec_backend() {
    let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&1), 1);
    assert_eq!(cache.get(&50), 12_586_269_025);
}

#[test]
fn test_each_index_computed_once() {
    // diamond: 0 -> {1, 2} -> 3
    struct Diamond {
        count: Rc<Cell<usize>>,
    }

    impl DpProblem<usize, u64> for Diamond {
        fn deps(&self, n: &usize) -> Vec<usize> {
            match n {
                0 => vec![1, 2],
                1 | 2 => vec![3],
                _ => vec![],
            }
        }

        fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
            self.count.set(self.count.get() + 1);
            match n {
                0 => deps[0] + deps[1],
                1 => deps[0] * 2,
                2 => deps[0] * 3,
                _ => 10,
            }
        }
    }

    let count = Rc::new(Cell::new(0));
    let cache = DpCache::with_problem(
        HashMapBackend::new(),
        Diamond {
            count: count.clone(),
        },
    );

    assert_eq!(cache.get(&0), 50);
    assert_eq!(count.get(), 4);

    assert_eq!(cache.get(&0), 50);
    assert_eq!(count.get(), 4);
    assert_eq!(cache.into_backend().len(), 4);
}

#[test]
fn test_closure_problem_with_tuple_index() {
    let binomial = DpCache::new(
        HashMapBackend::new(),
        |&(n, k): &(u64, u64)| {
            if k == 0 || k == n {
                vec![]
            } else {
                vec![(n - 1, k - 1), (n - 1, k)]
            }
        },
        |_: &(u64, u64), deps: Vec<u64>| if deps.is_empty() { 1 } else { deps[0] + deps[1] },
    );
    assert_eq!(binomial.get(&(10, 3)), 120);
    assert_eq!(binomial.get(&(30, 15)), 155_117_520);
}

#[test]
fn test_vec_backend_get_or_insert() {
    let mut backend: VecBackend<i32> = VecBackend::new();

    assert_eq!(*backend.get_or_insert(5, || 42), 42);
    // cached value wins over the new closure
    assert_eq!(*backend.get_or_insert(5, || 999), 42);
    assert_eq!(backend.get(&5), Some(&42));
    assert_eq!(backend.get(&3), None);
    assert_eq!(backend.get(&10), None);

    assert_eq!(*backend.get_or_insert(10, || 100), 100);
    assert_eq!(backend.get(&5), Some(&42));
}

#[test]
fn test_hashmap_backend_get_or_insert() {
    let mut backend: HashMapBackend<String, i32> = HashMapBackend::new();

    assert_eq!(*backend.get_or_insert("key1".to_string(), || 42), 42);
    assert_eq!(*backend.get_or_insert("key1".to_string(), || 999), 42);
    assert_eq!(backend.get(&"key1".to_string()), Some(&42));
    assert_eq!(backend.get(&"key2".to_string()), None);
    assert!(!backend.is_empty());
}

proptest! {
    #[test]
    fn fibonacci_matches_iterative(n in 0usize..80) {
        let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
        prop_assert_eq!(cache.get(&n), fib_iterative(n));
    }

    #[test]
    fn lookup_order_does_not_matter(order in prop::collection::vec(0usize..60, 1..20)) {
        let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
        for n in order {
            prop_assert_eq!(cache.get(&n), fib_iterative(n));
        }
    }
}
