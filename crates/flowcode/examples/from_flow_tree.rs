//! Example: Creating a flowchart from a hand-built flow tree
//!
//! This example builds the flow tree directly, without parsing source code,
//! and renders it through the same layout and export stages.

use flowcode::{
    FlowchartBuilder,
    flow::{Node, Program},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building flowchart from a flow tree...\n");

    let program = Program::new(vec![
        Node::process("total = 0"),
        Node::io("Input n"),
        Node::looping(
            "i < n",
            vec![
                Node::branch(
                    "i % 2 == 0",
                    vec![Node::process("total += i")],
                    vec![Node::io("odd")],
                ),
                Node::process("i++"),
            ],
        ),
        Node::io("total"),
        Node::end(),
    ]);

    println!("Flow tree has {} nodes, nested {} deep", program.node_count(), program.depth());

    let builder = FlowchartBuilder::default();
    let scene = builder.layout(&program)?;
    println!(
        "Laid out {} boxes and {} edges",
        scene.boxes().len(),
        scene.edges().len()
    );

    let svg = builder.render_svg(&scene)?;
    std::fs::write("flow_tree.svg", svg)?;
    println!("Wrote flow_tree.svg");

    Ok(())
}
