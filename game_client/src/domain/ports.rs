use crate::domain::controls::InputFrame;
use crate::domain::render::RenderCommand;

// Port for the rendering/physics collaborator.
pub trait RenderPort {
    fn apply(&mut self, command: RenderCommand);
}

// Port for sampling pointer and keyboard state once per frame.
pub trait InputPort {
    fn sample(&mut self) -> InputFrame;
}

impl RenderPort for Vec<RenderCommand> {
    fn apply(&mut self, command: RenderCommand) {
        self.push(command);
    }
}
