use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use phylodraw::ascii::ascii_string;
use phylodraw::layout::TreeLayout;
use phylodraw::model::{BranchLength, CladeIndex, Tree};
use phylodraw::plot::{DrawOptions, Orientation, draw};
use std::hint::black_box;

const TREE_SIZES: &[usize] = &[16, 128, 1024];

/// Balanced tree with `num_leaves` tips (a power of two) and unit branch lengths.
fn balanced_tree(num_leaves: usize) -> Tree {
    let mut tree = Tree::with_capacity(num_leaves);
    let mut layer: Vec<CladeIndex> = (0..num_leaves)
        .map(|i| tree.add_leaf(&format!("t{i}"), Some(BranchLength::new(1.0))))
        .collect();
    while layer.len() > 2 {
        layer = layer
            .chunks(2)
            .map(|pair| tree.add_clade(pair, Some(BranchLength::new(1.0))))
            .collect();
    }
    tree.add_root(&layer);
    tree
}

/// Caterpillar tree, the deepest tree with `num_leaves` tips.
fn caterpillar_tree(num_leaves: usize) -> Tree {
    let mut tree = Tree::with_capacity(num_leaves);
    let mut spine = tree.add_leaf("t0", Some(BranchLength::new(0.5)));
    for i in 1..num_leaves - 1 {
        let tip = tree.add_leaf(&format!("t{i}"), Some(BranchLength::new(0.5)));
        spine = tree.add_clade(&[spine, tip], Some(BranchLength::new(0.5)));
    }
    let last = tree.add_leaf(&format!("t{}", num_leaves - 1), None);
    tree.add_root(&[spine, last]);
    tree
}

fn layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for &n in TREE_SIZES {
        let balanced = balanced_tree(n);
        let caterpillar = caterpillar_tree(n);
        group.bench_with_input(BenchmarkId::new("balanced", n), &balanced, |b, tree| {
            b.iter(|| TreeLayout::new(black_box(tree)));
        });
        group.bench_with_input(BenchmarkId::new("caterpillar", n), &caterpillar, |b, tree| {
            b.iter(|| TreeLayout::new(black_box(tree)));
        });
    }
    group.finish();
}

fn ascii(c: &mut Criterion) {
    let mut group = c.benchmark_group("ascii");
    for &n in TREE_SIZES {
        let tree = balanced_tree(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &tree, |b, tree| {
            b.iter(|| ascii_string(black_box(tree), 200).unwrap());
        });
    }
    group.finish();
}

fn svg(c: &mut Criterion) {
    let mut group = c.benchmark_group("svg");
    let options = DrawOptions::new().with_do_show(false);
    let circular = DrawOptions::new()
        .with_do_show(false)
        .with_orientation(Orientation::circular());
    for &n in TREE_SIZES {
        let mut tree = balanced_tree(n);
        group.bench_function(BenchmarkId::new("vertical", n), |b| {
            b.iter(|| draw(&mut tree, &options).unwrap().to_svg());
        });
        group.bench_function(BenchmarkId::new("circular", n), |b| {
            b.iter(|| draw(&mut tree, &circular).unwrap().to_svg());
        });
    }
    group.finish();
}

criterion_group!(regression, layout, ascii);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = svg
}
criterion_main!(regression, reporting);
