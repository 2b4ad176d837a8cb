use std::collections::HashSet;

use glam::IVec2;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::animation::Joint;
use crate::controls::ControlPanel;
use crate::state::SceneState;

/// A keyboard shortcut's effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ToggleAnimation(Joint),
    /// All on, or all off if any joint is animating.
    ToggleAllAnimation,
    ResetView,
    TogglePanel,
    Quit,
}

/// Key bindings with a short description for the startup log.
pub const KEY_BINDINGS: [(KeyCode, Action, &str); 7] = [
    (KeyCode::Digit1, Action::ToggleAnimation(Joint::Head), "toggle head animation"),
    (KeyCode::Digit2, Action::ToggleAnimation(Joint::Scapular), "toggle scapular animation"),
    (KeyCode::Digit3, Action::ToggleAnimation(Joint::Wing), "toggle wing animation"),
    (KeyCode::Space, Action::ToggleAllAnimation, "toggle all animation"),
    (KeyCode::KeyR, Action::ResetView, "reset camera and model rotation"),
    (KeyCode::Tab, Action::TogglePanel, "show/hide control panel"),
    (KeyCode::Escape, Action::Quit, "quit"),
];

pub fn action_for_key(key: KeyCode) -> Option<Action> {
    KEY_BINDINGS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, action, _)| *action)
}

/// What the app should do after an input event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Response {
    pub redraw: bool,
    pub exit: bool,
}

impl Response {
    const NONE: Response = Response {
        redraw: false,
        exit: false,
    };

    fn redraw_if(redraw: bool) -> Self {
        Response {
            redraw,
            exit: false,
        }
    }
}

/// Routes window events to the control panel and the scene state.
///
/// The left mouse button either operates the panel or drags the model,
/// depending on where it was pressed. Keys fire once per physical press;
/// auto-repeat is ignored.
#[derive(Debug, Default)]
pub struct Input {
    keys_down: HashSet<KeyCode>,
    cursor: IVec2,
    panel: ControlPanel,
}

impl Input {
    pub fn new(panel: ControlPanel) -> Self {
        Self {
            keys_down: HashSet::new(),
            cursor: IVec2::ZERO,
            panel,
        }
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    /// Process a window event and update the scene state.
    pub fn handle_event(&mut self, event: &WindowEvent, state: &mut SceneState) -> Response {
        match event {
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(key) => {
                    self.key(key, event.state == ElementState::Pressed, state)
                }
                PhysicalKey::Unidentified(_) => Response::NONE,
            },
            WindowEvent::MouseInput { state: button_state, button, .. } => {
                self.mouse_button(*button, *button_state == ElementState::Pressed, state)
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = IVec2::new(position.x.round() as i32, position.y.round() as i32);
                self.cursor_moved(pos, state)
            }
            WindowEvent::CursorLeft { .. } => self.cursor_left(state),
            _ => Response::NONE,
        }
    }

    pub fn key(&mut self, key: KeyCode, pressed: bool, state: &mut SceneState) -> Response {
        if !pressed {
            self.keys_down.remove(&key);
            return Response::NONE;
        }
        if !self.keys_down.insert(key) {
            return Response::NONE;
        }

        match action_for_key(key) {
            Some(Action::ToggleAnimation(joint)) => {
                state.toggle_animation(joint);
                Response::redraw_if(true)
            }
            Some(Action::ToggleAllAnimation) => {
                let on = !state.flags.any();
                state.set_all_animation(on);
                Response::redraw_if(true)
            }
            Some(Action::ResetView) => {
                state.reset_view();
                Response::redraw_if(true)
            }
            Some(Action::TogglePanel) => {
                let visible = self.panel.toggle_visible();
                log::debug!("control panel {}", if visible { "shown" } else { "hidden" });
                Response::redraw_if(true)
            }
            Some(Action::Quit) => Response {
                redraw: false,
                exit: true,
            },
            None => Response::NONE,
        }
    }

    pub fn mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        state: &mut SceneState,
    ) -> Response {
        if button != MouseButton::Left {
            return Response::NONE;
        }
        if pressed {
            if self.panel.press(self.cursor.as_vec2(), state) {
                return Response::redraw_if(true);
            }
            state.press(self.cursor);
        } else {
            self.panel.release();
            state.release();
        }
        Response::NONE
    }

    pub fn cursor_moved(&mut self, pos: IVec2, state: &mut SceneState) -> Response {
        self.cursor = pos;
        let slid = self.panel.drag(pos.as_vec2(), state);
        let dragged = state.pointer_moved(pos);
        Response::redraw_if(slid || dragged)
    }

    /// The cursor left the window: any drag or slider capture ends.
    pub fn cursor_left(&mut self, state: &mut SceneState) -> Response {
        self.panel.release();
        state.leave();
        Response::NONE
    }
}
