use voxpatch::{ColorRegistry, Colormap, Rgb16, Shell, VirtualObject};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn new_color_appends_and_reallocates() {
    init_logging();
    let mut registry = ColorRegistry::new(1);
    let mut map = Colormap::new(1);
    assert_eq!(registry.new_color(&mut map), 1);
    assert_eq!(registry.new_color(&mut map), 2);
    assert_eq!(registry.ncolors(), 3);
    assert_eq!(map.ncolors(), 3);
    assert!(!map.valid);
}

#[test]
fn unused_color_number_finds_the_lowest_gap() {
    let registry = ColorRegistry::new(4);
    let shells = vec![
        Shell::new(0, Rgb16::white()),
        Shell::new(2, Rgb16::black()),
    ];
    assert_eq!(registry.unused_color_number(&shells), Some(1));
    let full = vec![
        Shell::new(0, Rgb16::white()),
        Shell::new(1, Rgb16::white()),
        Shell::new(2, Rgb16::white()),
        Shell::new(3, Rgb16::white()),
    ];
    assert_eq!(registry.unused_color_number(&full), None);
}

#[test]
fn eliminate_color_relabels_the_top() {
    let mut registry = ColorRegistry::new(3);
    let mut map = Colormap::new(3);
    let mut shells = vec![
        Shell::new(0, Rgb16::new(100, 0, 0)),
        Shell::new(2, Rgb16::new(0, 200, 0)),
    ];
    registry.eliminate_color(&mut shells, &mut map, 1);
    assert_eq!(registry.ncolors(), 2);
    assert_eq!(shells[0].o.color, 0);
    assert_eq!(shells[1].o.color, 1);
    assert_eq!(shells[1].o.rgb, Rgb16::new(0, 200, 0));
    assert_eq!(map.ncolors(), 2);
}

#[test]
fn compaction_yields_dense_indices() {
    init_logging();
    let mut registry = ColorRegistry::new(1);
    let mut map = Colormap::new(1);
    for _ in 0..5 {
        registry.new_color(&mut map);
    }
    assert_eq!(registry.ncolors(), 6);
    let mut shells = vec![
        Shell::new(0, Rgb16::new(1, 0, 0)),
        Shell::new(2, Rgb16::new(2, 0, 0)),
        Shell::new(5, Rgb16::new(3, 0, 0)),
    ];
    registry.eliminate_unused_colors(&mut shells, &mut map);
    assert_eq!(registry.ncolors(), 3);
    let mut used: Vec<usize> = shells.iter().map(|s| s.o.color).collect();
    used.sort();
    assert_eq!(used, vec![0, 1, 2]);
    // reflectances ride along with their objects
    assert_eq!(shells[0].o.rgb, Rgb16::new(1, 0, 0));
    assert_eq!(shells[1].o.rgb, Rgb16::new(2, 0, 0));
    assert_eq!(shells[2].o.rgb, Rgb16::new(3, 0, 0));
    // unrelabeled objects keep their indices
    assert_eq!(shells[0].o.color, 0);
    assert_eq!(shells[1].o.color, 2);
    assert_eq!(shells[2].o.color, 1);
    assert_eq!(map.ncolors(), 3);
}

#[test]
fn compaction_counts_reflection_sub_objects() {
    let mut registry = ColorRegistry::new(3);
    let mut map = Colormap::new(3);
    let mut shell = Shell::new(0, Rgb16::white());
    shell.reflection = Some(VirtualObject {
        color: 2,
        rgb: Rgb16::gray(5),
    });
    let mut shells = vec![shell];
    registry.eliminate_unused_colors(&mut shells, &mut map);
    assert_eq!(registry.ncolors(), 2);
    let r = shells[0].reflection.as_ref().unwrap();
    assert_eq!(r.color, 1);
    assert_eq!(r.rgb, Rgb16::gray(5));
}

#[test]
fn compaction_never_drops_below_one_color() {
    let mut registry = ColorRegistry::new(3);
    let mut map = Colormap::new(3);
    let mut shells: Vec<Shell> = Vec::new();
    registry.eliminate_unused_colors(&mut shells, &mut map);
    assert_eq!(registry.ncolors(), 1);
}
