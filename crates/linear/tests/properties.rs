use linear::{backward_solve, decompose, forward_solve, lu_solve, Collection, Options, Solution};
use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CscMatrix;
use num_bigint::BigInt;
use proptest::prelude::*;
use scalar::{BigRational, FractionArithmetic, NumberArithmetic};

fn integer_matrix(rows: usize, columns: usize) -> impl Strategy<Value = DMatrix<BigRational>> {
    proptest::collection::vec(-5i64..=5, rows * columns).prop_map(move |data| {
        DMatrix::from_iterator(
            rows,
            columns,
            data.into_iter().map(|x| BigRational::from_integer(BigInt::from(x))),
        )
    })
}

fn shape() -> impl Strategy<Value = (usize, usize)> {
    (1usize..5, 1usize..5)
}

/// Strictly diagonally dominant, hence nonsingular.
fn dominant_matrix(n: usize) -> impl Strategy<Value = DMatrix<f64>> {
    proptest::collection::vec(-10.0_f64..10.0, n * n).prop_map(move |data| {
        let mut a = DMatrix::from_vec(n, n, data);
        for i in 0..n {
            let off: f64 = (0..n).filter(|&j| j != i).map(|j| a[(i, j)].abs()).sum();
            let sign = if a[(i, i)] < 0.0 { -1.0 } else { 1.0 };
            a[(i, i)] = sign * (off + 1.0);
        }
        a
    })
}

fn system() -> impl Strategy<Value = (DMatrix<f64>, DVector<f64>)> {
    (1usize..6).prop_flat_map(|n| {
        (
            dominant_matrix(n),
            proptest::collection::vec(-10.0_f64..10.0, n).prop_map(DVector::from_vec),
        )
    })
}

#[derive(Clone, Copy, Debug)]
enum Triangle {
    Lower,
    Upper,
}

/// Row-dominant triangular system with a nonzero diagonal.
fn triangular_system(triangle: Triangle) -> impl Strategy<Value = (DMatrix<f64>, DVector<f64>)> {
    system().prop_map(move |(a, b)| {
        let t = match triangle {
            Triangle::Lower => a.lower_triangle(),
            Triangle::Upper => a.upper_triangle(),
        };
        (t, b)
    })
}

/// Integer upper triangular matrix whose diagonal is zero at exactly one position, together
/// with a right-hand side that keeps the system consistent.
fn singular_upper_system() -> impl Strategy<Value = (DMatrix<BigRational>, DVector<BigRational>)>
{
    (2usize..5).prop_flat_map(|n| {
        (
            proptest::collection::vec(-5i64..=5, n * n),
            proptest::collection::vec(1i64..=5, n),
            proptest::collection::vec(-5i64..=5, n),
            0..n,
        )
            .prop_map(move |(data, diagonal, x, k)| {
                let int = |v: i64| BigRational::from_integer(BigInt::from(v));
                let u = DMatrix::from_fn(n, n, |i, j| {
                    if i > j || (i == j && i == k) {
                        int(0)
                    } else if i == j {
                        int(diagonal[i])
                    } else {
                        int(data[i * n + j])
                    }
                });
                let x = DVector::from_iterator(n, x.into_iter().map(int));
                let b = &u * &x;
                (u, b)
            })
    })
}

fn solve_triangle(triangle: Triangle, m: Collection<f64>, b: &DVector<f64>) -> DVector<f64> {
    let arith = NumberArithmetic::default();
    let b = Collection::from(b.clone());
    let solution = match triangle {
        Triangle::Lower => forward_solve(&arith, &m, Some(&b), &Options::default()),
        Triangle::Upper => backward_solve(&arith, &m, Some(&b), &Options::default()),
    };
    solution.unwrap().into_unique().unwrap()
}

fn assert_solves(
    m: &DMatrix<f64>,
    x: &DVector<f64>,
    b: &DVector<f64>,
) -> Result<(), TestCaseError> {
    let mx = m * x;
    for i in 0..b.len() {
        let tol = 1e-9 * b[i].abs().max(1.0);
        prop_assert!((mx[i] - b[i]).abs() < tol, "Mx[{}]={}, b[{}]={}", i, mx[i], i, b[i]);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn lup_reconstructs_rows_exactly(a in shape().prop_flat_map(|(r, c)| integer_matrix(r, c))) {
        let lup = decompose(&FractionArithmetic::new(), &Collection::from(a.clone())).unwrap();
        let lu = &lup.l * &lup.u;

        prop_assert_eq!(lup.l.nrows(), a.nrows());
        prop_assert_eq!(lup.u.ncols(), a.ncols());
        for i in 0..a.nrows() {
            prop_assert_eq!(lu.row(lup.p[i]), a.row(i));
        }
    }

    #[test]
    fn lup_factors_are_triangular(a in shape().prop_flat_map(|(r, c)| integer_matrix(r, c))) {
        let lup = decompose(&FractionArithmetic::new(), &Collection::from(a)).unwrap();
        let one = BigRational::from_integer(BigInt::from(1));
        let zero = BigRational::from_integer(BigInt::from(0));

        for i in 0..lup.l.nrows() {
            for j in i..lup.l.ncols() {
                let expected = if i == j { &one } else { &zero };
                prop_assert_eq!(&lup.l[(i, j)], expected);
            }
        }
        for i in 0..lup.u.nrows() {
            for j in 0..i.min(lup.u.ncols()) {
                prop_assert_eq!(lup.u[(i, j)].clone(), zero.clone());
            }
        }
    }

    #[test]
    fn permutation_is_a_bijection(a in shape().prop_flat_map(|(r, c)| integer_matrix(r, c))) {
        let lup = decompose(&FractionArithmetic::new(), &Collection::from(a.clone())).unwrap();
        let mut seen = lup.p.clone();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..a.nrows()).collect::<Vec<_>>());

        let order = lup.row_order();
        for (i, &pi) in lup.p.iter().enumerate() {
            prop_assert_eq!(order[pi], i);
        }
    }

    #[test]
    fn lusolve_round_trip((a, b) in system()) {
        let arith = NumberArithmetic::default();
        let x = lu_solve(
            &arith,
            &Collection::from(a.clone()),
            Some(&Collection::from(b.clone())),
            &Options::default(),
        )
        .unwrap()
        .into_unique()
        .unwrap();

        let ax = &a * &x;
        for i in 0..b.len() {
            let tol = 1e-9 * b[i].abs().max(1.0);
            prop_assert!((ax[i] - b[i]).abs() < tol, "Ax[{}]={}, b[{}]={}", i, ax[i], i, b[i]);
        }
    }

    #[test]
    fn forward_solve_round_trip((l, b) in triangular_system(Triangle::Lower)) {
        let dense = solve_triangle(Triangle::Lower, Collection::from(l.clone()), &b);
        assert_solves(&l, &dense, &b)?;

        let sparse = solve_triangle(Triangle::Lower, Collection::from(CscMatrix::from(&l)), &b);
        for i in 0..b.len() {
            prop_assert!((dense[i] - sparse[i]).abs() <= 1e-12 * dense[i].abs().max(1.0));
        }
    }

    #[test]
    fn backward_solve_round_trip((u, b) in triangular_system(Triangle::Upper)) {
        let dense = solve_triangle(Triangle::Upper, Collection::from(u.clone()), &b);
        assert_solves(&u, &dense, &b)?;

        let sparse = solve_triangle(Triangle::Upper, Collection::from(CscMatrix::from(&u)), &b);
        for i in 0..b.len() {
            prop_assert!((dense[i] - sparse[i]).abs() <= 1e-12 * dense[i].abs().max(1.0));
        }
    }

    #[test]
    fn one_free_variable_gives_two_solutions((u, b) in singular_upper_system()) {
        let solution = backward_solve(
            &FractionArithmetic::new(),
            &Collection::from(u.clone()),
            Some(&Collection::from(b.clone())),
            &Options::default(),
        )
        .unwrap();

        let solutions = match solution {
            Solution::Multiple(xs) => xs,
            Solution::Unique(x) => panic!("expected a free variable, got unique {:?}", x),
        };
        prop_assert_eq!(solutions.len(), 2);
        for x in &solutions {
            prop_assert_eq!(&u * x, b.clone());
        }
        prop_assert_ne!(&solutions[0], &solutions[1]);
    }
}
