/// Ports module defining the interfaces between the pipeline core and
/// its external collaborators (release feed, tools, databases, persistence).
pub mod outbound;
