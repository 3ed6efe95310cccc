use stack_lib::collections::Stack;

fn main() {
    let mut int_stack = Stack::new();
    int_stack.push(1);
    int_stack.push(34);
    int_stack.push(18);
    int_stack.push(29);
    int_stack.push(69);

    println!("-------------------------------------");

    int_stack.print_all();

    println!("{:?}", int_stack.pop_or_default());
    println!("{:?}", int_stack.pop_or_default());
    int_stack.print_all();
    println!("Is the int stack empty? : {}", int_stack.is_empty());

    let mut str_stack = Stack::new();
    str_stack.push("🎃");
    str_stack.push("🧛🏻‍♂️");
    str_stack.push("📖");
    str_stack.push("🍁");
    str_stack.push("🕯️");
    str_stack.push("☕");

    println!("---------------------------------------");

    str_stack.print_all();
    str_stack.pop();
    println!("{:?}", str_stack.pop_or_default());
    str_stack.print_all();
    println!("Is the str stack empty? : {}", str_stack.is_empty());

    // Drain whatever is left, top first.
    for item in str_stack.drain() {
        println!("Popped {}", item);
    }
    str_stack.print_all();
}
