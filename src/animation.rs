//! Joint angles, animation flags and the frame clock.
//!
//! Animated joints follow fixed oscillators of elapsed time `t` (seconds):
//!
//! | Joint    | Formula (degrees)   | Period | Range        |
//! |----------|---------------------|--------|--------------|
//! | head     | `20 sin(2t) + 20`   | π      | `[0, 40]`    |
//! | scapular | `30 sin(2t)`        | π      | `[-30, 30]`  |
//! | wing     | `90 sin(8t)`        | π / 4  | `[-90, 90]`  |

use std::time::Instant;

/// The bird's articulated joint angles, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JointAngles {
    pub head: f32,
    pub scapular: f32,
    pub wing: f32,
}

/// Which joints are driven by time instead of sliders.
///
/// The default has every flag cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationFlags {
    pub head: bool,
    pub scapular: bool,
    pub wing: bool,
}

/// Selects one animated joint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Joint {
    Head,
    Scapular,
    Wing,
}

impl Joint {
    pub const ALL: [Joint; 3] = [Joint::Head, Joint::Scapular, Joint::Wing];

    pub fn label(self) -> &'static str {
        match self {
            Joint::Head => "head",
            Joint::Scapular => "scapular",
            Joint::Wing => "wing",
        }
    }
}

pub fn head_angle(t: f32) -> f32 {
    20.0 * (2.0 * t).sin() + 20.0
}

pub fn scapular_angle(t: f32) -> f32 {
    30.0 * (2.0 * t).sin()
}

pub fn wing_angle(t: f32) -> f32 {
    90.0 * (8.0 * t).sin()
}

impl JointAngles {
    pub fn new(head: f32, scapular: f32, wing: f32) -> Self {
        Self {
            head,
            scapular,
            wing,
        }
    }

    pub fn get(&self, joint: Joint) -> f32 {
        match joint {
            Joint::Head => self.head,
            Joint::Scapular => self.scapular,
            Joint::Wing => self.wing,
        }
    }

    pub fn set(&mut self, joint: Joint, degrees: f32) {
        match joint {
            Joint::Head => self.head = degrees,
            Joint::Scapular => self.scapular = degrees,
            Joint::Wing => self.wing = degrees,
        }
    }

    /// Angles at time `t`: flagged joints follow their oscillator, the rest
    /// keep their current value.
    pub fn animated(&self, flags: &AnimationFlags, t: f32) -> JointAngles {
        JointAngles {
            head: if flags.head { head_angle(t) } else { self.head },
            scapular: if flags.scapular {
                scapular_angle(t)
            } else {
                self.scapular
            },
            wing: if flags.wing { wing_angle(t) } else { self.wing },
        }
    }
}

impl AnimationFlags {
    /// Every joint animated.
    pub const ALL: AnimationFlags = AnimationFlags {
        head: true,
        scapular: true,
        wing: true,
    };

    pub fn get(&self, joint: Joint) -> bool {
        match joint {
            Joint::Head => self.head,
            Joint::Scapular => self.scapular,
            Joint::Wing => self.wing,
        }
    }

    pub fn set(&mut self, joint: Joint, on: bool) {
        match joint {
            Joint::Head => self.head = on,
            Joint::Scapular => self.scapular = on,
            Joint::Wing => self.wing = on,
        }
    }

    /// Flips the flag and returns its new value.
    pub fn toggle(&mut self, joint: Joint) -> bool {
        let on = !self.get(joint);
        self.set(joint, on);
        on
    }

    pub fn any(&self) -> bool {
        self.head || self.scapular || self.wing
    }
}

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    /// A snapshot at an arbitrary elapsed time, for driving the loop manually.
    pub fn at(elapsed: f32) -> Self {
        Self {
            elapsed,
            frame_index: 0,
        }
    }
}

/// Monotonic clock sampled once per frame.
///
/// Elapsed time is measured from construction and never clamped, so the
/// oscillators stay in phase with wall time.
#[derive(Debug, Clone)]
pub struct Clock {
    start: Instant,
    frame_index: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            frame_index: 0,
        }
    }

    /// Advances the clock and returns this frame's timing.
    pub fn tick(&mut self) -> FrameTime {
        let ft = FrameTime {
            elapsed: self.start.elapsed().as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
