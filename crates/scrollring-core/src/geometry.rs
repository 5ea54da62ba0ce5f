#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: self.x + self.w / 2.0,
            y: self.y + self.h / 2.0,
        }
    }

    /// Square of side `size` anchored `inset` px from the bottom-right of a
    /// `width` x `height` screen.
    pub fn bottom_right(width: f32, height: f32, size: f32, inset: f32) -> Self {
        Rect {
            x: width - inset - size,
            y: height - inset - size,
            w: size,
            h: size,
        }
    }
}
