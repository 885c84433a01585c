/// A single display block handed to the renderer, in message order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderUnit {
    Text(String),
    Image { url: String },
}
