//! Chamber grids
//!
//! `X` is wall, `.` is floor, blank cells are not part of the chamber. The
//! letters `N`, `S`, `W` and `E` are door positions on that side of the
//! chamber; a side may offer more than one. Doors that are not chosen are
//! plain wall.

pub(super) const CROSS: &[&str] = &[
    "    XNX    ",
    "    X.X    ",
    "    X.X    ",
    "XXXXX.XXXXX",
    "W.........E",
    "XXXXX.XXXXX",
    "    X.X    ",
    "    X.X    ",
    "    XSX    ",
];

pub(super) const PILLAR_HALL: &[&str] = &[
    "XXXXXNXXXXX",
    "X.........X",
    "X.X.X.X.X.X",
    "W.........E",
    "X.X.X.X.X.X",
    "X.........X",
    "XXXXXSXXXXX",
];

pub(super) const OCTAGON: &[&str] = &[
    "  XXNXX  ",
    " XX...XX ",
    "XX.....XX",
    "X.......X",
    "W.......E",
    "X.......X",
    "XX.....XX",
    " XX...XX ",
    "  XXSXX  ",
];

pub(super) const DIAMOND: &[&str] = &[
    "    XXNXX    ",
    "   XX...XX   ",
    "  XX.....XX  ",
    " XX.......XX ",
    "XX.........XX",
    "W...........E",
    "XX.........XX",
    " XX.......XX ",
    "  XX.....XX  ",
    "   XX...XX   ",
    "    XXSXX    ",
];

pub(super) const CRYPT: &[&str] = &[
    "XXXXXXNXXXXXX",
    "X...........X",
    "X.XX.XXX.XX.X",
    "X...........X",
    "W...........E",
    "X...........X",
    "X.XX.XXX.XX.X",
    "X...........X",
    "XXXXXXSXXXXXX",
];

pub(super) const SHRINE: &[&str] = &[
    "XXXXNXXXX",
    "X.......X",
    "X.XX.XX.X",
    "X.X...X.X",
    "W...X...E",
    "X.X...X.X",
    "X.XX.XX.X",
    "X.......X",
    "XXXXSXXXX",
];

pub(super) const CLOISTER: &[&str] = &[
    "XXXXXXNXXXXXX",
    "X...........X",
    "X.XXXX.XXXX.X",
    "X.X.......X.X",
    "X.X.......X.X",
    "X.X.......X.X",
    "W...........E",
    "X.X.......X.X",
    "X.X.......X.X",
    "X.X.......X.X",
    "X.XXXX.XXXX.X",
    "X...........X",
    "XXXXXXSXXXXXX",
];

pub(super) const GALLERY: &[&str] = &[
    "XXXXXXXNXXXXXXX",
    "X.X.X.X.X.X.X.X",
    "X.............X",
    "W.............E",
    "X.............X",
    "X.X.X.X.X.X.X.X",
    "XXXXXXXSXXXXXXX",
];

pub(super) const ZIGGURAT: &[&str] = &[
    "    XXNXX    ",
    "    X...X    ",
    "  XXX...XXX  ",
    "  X.......X  ",
    "XXX.......XXX",
    "W...........E",
    "XXX.......XXX",
    "  X.......X  ",
    "  XXX...XXX  ",
    "    X...X    ",
    "    XXSXX    ",
];

pub(super) const ROTUNDA: &[&str] = &[
    "   XXNXX   ",
    "  XX...XX  ",
    " XX.....XX ",
    "XX.......XX",
    "X....X....X",
    "W...XXX...E",
    "X....X....X",
    "XX.......XX",
    " XX.....XX ",
    "  XX...XX  ",
    "   XXSXX   ",
];

pub(super) const VESTIBULE: &[&str] = &[
    "XXXNXXX",
    "X.....X",
    "X.....X",
    "W.....E",
    "X.....X",
    "X.....X",
    "XXXSXXX",
];

pub(super) const ARMORY: &[&str] = &[
    "XXXXXNXXXXX",
    "X...X.X...X",
    "X...X.X...X",
    "X.........X",
    "W.........E",
    "X.........X",
    "X...X.X...X",
    "X...X.X...X",
    "XXXXXSXXXXX",
];

pub(super) const BARRACKS: &[&str] = &[
    "XXNXXXXXXXNXX",
    "X...........X",
    "W...........E",
    "X.X.X.X.X.X.X",
    "W...........E",
    "X...........X",
    "XXSXXXXXXXSXX",
];

pub(super) const SANCTUM: &[&str] = &[
    "XXXXXXXNXXXXXXX",
    "X.............X",
    "X.XXXXX.XXXXX.X",
    "X.X.........X.X",
    "X.X..XXXXX..X.X",
    "W....X...X....E",
    "X.X..XX.XX..X.X",
    "X.X.........X.X",
    "X.XXXXX.XXXXX.X",
    "X.............X",
    "XXXXXXXSXXXXXXX",
];

pub(super) const CHAPEL: &[&str] = &[
    "XXXXNXXXX",
    "X.......X",
    "X.X...X.X",
    "X.......X",
    "X.X...X.X",
    "W.......E",
    "X.X...X.X",
    "X.......X",
    "X.XX.XX.X",
    "X.......X",
    "XXXXSXXXX",
];
