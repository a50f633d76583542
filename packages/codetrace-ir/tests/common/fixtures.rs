//! Source snippets per language

pub const JS_RECURSION: &str = "\
function countdown(n) {
  if (n === 0) return;
  countdown(n - 1);
}
countdown(3);
";

pub const JS_LOOP: &str = "\
let arr = [3, 1, 2];
for (let i = 0; i < arr.length; i++) {
  console.log(\"item\", i);
}
";

pub const JS_ASSIGN_PRINT: &str = "\
let total = 0;
total = 10;
console.log(\"total:\", total);
";

pub const JAVA_PROGRAM: &str = "\
public class Main {
    static int fact(int n) {
        if (n <= 1) return 1;
        return n * fact(n - 1);
    }

    public static void main(String[] args) {
        int x = 5;
        System.out.println(\"x = \" + x);
        fact(x);
    }
}
";

pub const CPP_PROGRAM: &str = "\
#include <iostream>
using namespace std;

struct Node {
    int data;
    Node* next;
    Node* prev;
};

int main() {
    int arr[3] = {10, 20, 30};
    for (int i = 0; i < 3; i++) {
        cout << \"i=\" << i << endl;
    }
    return 0;
}
";

pub const PYTHON_PROGRAM: &str = "\
def fib(n):
    if n < 2:
        return n
    return fib(n - 1)

nums = [4, 5]
for i in range(3):
    print(i)
fib(4)
";

/// Every language tag with a snippet exercising it
pub fn all_programs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("javascript", JS_RECURSION),
        ("javascript", JS_LOOP),
        ("javascript", JS_ASSIGN_PRINT),
        ("java", JAVA_PROGRAM),
        ("cpp", CPP_PROGRAM),
        ("python", PYTHON_PROGRAM),
    ]
}
